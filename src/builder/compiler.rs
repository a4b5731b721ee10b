//! Statement compiler
//!
//! [`Compiler`] holds the configuration and the field comparator; the free
//! functions use a default compiler.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use super::bucket::where_conditions;
use super::config::{CompilerConfig, FieldOrdering};
use super::directive::Directives;
use super::errors::BuilderResult;
use super::statement::{assemble_insert, assemble_select, Statement};
use super::value::{Value, WhereMap};

/// Comparator deciding field order within one operator group
pub type FieldOrder = fn(&str, &str) -> Ordering;

fn ascending(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

fn descending(a: &str, b: &str) -> Ordering {
    b.cmp(a)
}

/// Compiles predicate maps and rows into statements
#[derive(Clone)]
pub struct Compiler {
    config: CompilerConfig,
    field_order: FieldOrder,
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        let field_order = match config.field_order {
            FieldOrdering::Ascending => ascending as FieldOrder,
            FieldOrdering::Descending => descending as FieldOrder,
        };
        Self {
            config,
            field_order,
        }
    }

    /// Replaces the field comparator
    pub fn with_field_order(mut self, order: FieldOrder) -> Self {
        self.field_order = order;
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub(crate) fn compare_fields(&self, a: &str, b: &str) -> Ordering {
        (self.field_order)(a, b)
    }

    /// Compiles a select over `table`
    ///
    /// An empty `fields` list selects `*`. Directive keys in `where_map`
    /// become modifiers; every other key becomes a predicate.
    pub fn select<S: AsRef<str>>(
        &self,
        table: &str,
        where_map: &WhereMap,
        fields: &[S],
    ) -> BuilderResult<Statement> {
        let directives = Directives::parse(where_map)?;
        let conditions = where_conditions(self, where_map, 0)?;
        let fields: Vec<String> = fields.iter().map(|f| f.as_ref().to_string()).collect();

        let stmt = assemble_select(table, &fields, &directives, &conditions);
        debug!(table, placeholders = stmt.values.len(), "compiled select");
        Ok(stmt)
    }

    /// Compiles a multi-row insert into `table`
    pub fn insert(&self, table: &str, rows: &[Vec<Value>]) -> BuilderResult<Statement> {
        let stmt = assemble_insert(table, None, rows)?;
        debug!(table, rows = rows.len(), placeholders = stmt.values.len(), "compiled insert");
        Ok(stmt)
    }

    /// Compiles an insert that creates `table` from `supertable` with `tags`
    ///
    /// An empty `supertable` behaves like [`Compiler::insert`].
    pub fn insert_with_tags(
        &self,
        table: &str,
        supertable: &str,
        tags: &[Value],
        rows: &[Vec<Value>],
    ) -> BuilderResult<Statement> {
        let stmt = assemble_insert(table, Some((supertable, tags)), rows)?;
        debug!(
            table,
            supertable,
            rows = rows.len(),
            placeholders = stmt.values.len(),
            "compiled insert"
        );
        Ok(stmt)
    }
}

/// Compiles a select with the default compiler
pub fn build_select<S: AsRef<str>>(
    table: &str,
    where_map: &WhereMap,
    fields: &[S],
) -> BuilderResult<Statement> {
    Compiler::default().select(table, where_map, fields)
}

/// Compiles an insert with the default compiler
pub fn build_insert(table: &str, rows: &[Vec<Value>]) -> BuilderResult<Statement> {
    Compiler::default().insert(table, rows)
}

/// Compiles a supertable insert with the default compiler
pub fn build_insert_with_tags(
    table: &str,
    supertable: &str,
    tags: &[Value],
    rows: &[Vec<Value>],
) -> BuilderResult<Statement> {
    Compiler::default().insert_with_tags(table, supertable, tags, rows)
}
