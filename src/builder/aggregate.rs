//! Aggregate call expressions for select field lists

use std::fmt;

/// An aggregate call such as `count(col)`, optionally aliased
///
/// `text` holds the call expression followed by ` as alias` when aliased;
/// `call_len` marks where the call ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    text: String,
    call_len: usize,
}

impl Aggregate {
    fn from_expr(expr: String) -> Self {
        Self {
            call_len: expr.len(),
            text: expr,
        }
    }

    fn call(func: &str, col: &str) -> Self {
        Self::from_expr(format!("{}({})", func, col))
    }

    fn call_with(func: &str, col: &str, args: &[i64]) -> Self {
        let mut expr = String::with_capacity(func.len() + col.len() + args.len() * 4 + 2);
        expr.push_str(func);
        expr.push('(');
        expr.push_str(col);
        for arg in args {
            expr.push(',');
            expr.push_str(&arg.to_string());
        }
        expr.push(')');
        Self::from_expr(expr)
    }

    pub fn count(col: &str) -> Self {
        Self::call("count", col)
    }

    pub fn max(col: &str) -> Self {
        Self::call("max", col)
    }

    pub fn min(col: &str) -> Self {
        Self::call("min", col)
    }

    pub fn avg(col: &str) -> Self {
        Self::call("avg", col)
    }

    pub fn sum(col: &str) -> Self {
        Self::call("sum", col)
    }

    /// Time-weighted average
    pub fn twa(col: &str) -> Self {
        Self::call("twa", col)
    }

    pub fn stddev(col: &str) -> Self {
        Self::call("stddev", col)
    }

    /// Least-squares fit with start value and step
    pub fn leastsquares(col: &str, start: i64, step: i64) -> Self {
        Self::call_with("leastsquares", col, &[start, step])
    }

    pub fn top(col: &str, k: i64) -> Self {
        Self::call_with("top", col, &[k])
    }

    pub fn bottom(col: &str, k: i64) -> Self {
        Self::call_with("bottom", col, &[k])
    }

    pub fn first(col: &str) -> Self {
        Self::call("first", col)
    }

    pub fn last(col: &str) -> Self {
        Self::call("last", col)
    }

    pub fn percentile(col: &str, p: i64) -> Self {
        Self::call_with("percentile", col, &[p])
    }

    /// Approximate percentile
    pub fn apercentile(col: &str, p: i64) -> Self {
        Self::call_with("apercentile", col, &[p])
    }

    pub fn last_row(col: &str) -> Self {
        Self::call("last_row", col)
    }

    pub fn spread(col: &str) -> Self {
        Self::call("spread", col)
    }

    pub fn diff(col: &str) -> Self {
        Self::call("diff", col)
    }

    /// Renders as `expr as alias`; a blank alias is ignored
    pub fn alias(mut self, alias: &str) -> Self {
        self.text.truncate(self.call_len);
        let alias = alias.trim();
        if !alias.is_empty() {
            self.text.push_str(" as ");
            self.text.push_str(alias);
        }
        self
    }

    /// Field-list text for this aggregate
    pub fn symbol(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl AsRef<str> for Aggregate {
    fn as_ref(&self) -> &str {
        self.symbol()
    }
}
