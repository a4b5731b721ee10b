//! Clause assembly
//!
//! Select grammar, each part emitted only when present:
//!
//! ```text
//! select <fields|*> from <table>
//!   [where (<expr>)] [interval(<n><unit>)] [fill <policy>]
//!   [group by <text>] [order by <text>] [slimit ?,?] [limit ?,?]
//! ```
//!
//! Insert grammar:
//!
//! ```text
//! insert into <table> [using <supertable> tags(?,...)] values (?,...)[,(?,...)...]
//! ```

use serde::{Deserialize, Serialize};

use super::condition::{connect, placeholders, Condition};
use super::directive::Directives;
use super::errors::{BuilderError, BuilderResult};
use super::value::Value;

/// Compiled statement text and its bound values, in placeholder order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(rename = "query")]
    pub text: String,
    pub values: Vec<Value>,
}

impl Statement {
    /// Number of `?` placeholders in the text
    pub fn placeholder_count(&self) -> usize {
        self.text.matches('?').count()
    }
}

/// Assembles a select statement
pub(crate) fn assemble_select(
    table: &str,
    fields: &[String],
    directives: &Directives,
    conditions: &[Condition],
) -> Statement {
    let mut text = String::with_capacity(64);
    text.push_str("select ");
    if fields.is_empty() {
        text.push('*');
    } else {
        text.push_str(&fields.join(","));
    }
    text.push_str(" from ");
    text.push_str(table);

    let (where_text, mut values) = connect("and", conditions);
    if !where_text.is_empty() {
        text.push_str(" where ");
        text.push_str(&where_text);
    }
    if let Some(interval) = &directives.interval {
        text.push_str(&format!(" interval({})", interval));
    }
    if let Some(fill) = &directives.fill {
        text.push_str(" fill ");
        text.push_str(fill);
    }
    if let Some(group_by) = &directives.group_by {
        text.push_str(" group by ");
        text.push_str(group_by);
    }
    if let Some(order_by) = &directives.order_by {
        text.push_str(" order by ");
        text.push_str(order_by);
    }
    if let Some(slimit) = &directives.slimit {
        text.push_str(" slimit ?,?");
        values.extend(slimit.values());
    }
    if let Some(limit) = &directives.limit {
        text.push_str(" limit ?,?");
        values.extend(limit.values());
    }

    Statement { text, values }
}

/// Assembles an insert, optionally through a supertable with tag values
///
/// Tag values are bound before row values; every row must match the arity of
/// the first.
pub(crate) fn assemble_insert(
    table: &str,
    supertable: Option<(&str, &[Value])>,
    rows: &[Vec<Value>],
) -> BuilderResult<Statement> {
    let first = rows.first().ok_or(BuilderError::InsertNoRows)?;
    let arity = first.len();
    if let Some((row, found)) = rows
        .iter()
        .enumerate()
        .find(|(_, r)| r.len() != arity)
        .map(|(i, r)| (i, r.len()))
    {
        return Err(BuilderError::RowArity {
            row,
            expected: arity,
            found,
        });
    }

    let mut text = String::with_capacity(32 + rows.len() * (arity * 2 + 3));
    let mut values = Vec::new();
    text.push_str("insert into ");
    text.push_str(table);

    if let Some((stable, tags)) = supertable.filter(|(s, _)| !s.is_empty()) {
        text.push_str(" using ");
        text.push_str(stable);
        text.push_str(" tags");
        text.push_str(&placeholders(tags.len()));
        values.extend(tags.iter().cloned());
    }

    text.push_str(" values ");
    let tuple = placeholders(arity);
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            text.push(',');
        }
        text.push_str(&tuple);
        values.extend(row.iter().cloned());
    }

    Ok(Statement { text, values })
}
