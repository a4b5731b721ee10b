//! Renderable predicate fragments
//!
//! A [`Condition`] renders into text fragments and the values bound to the
//! `?` placeholders in those fragments, left to right. Every variant keeps
//! the two sides aligned; null checks contribute text but no values.

use super::operator::Operator;
use super::value::{NullType, Value};

/// Field/value pairs, already in emission order
pub type Terms = Vec<(String, Value)>;

/// Field/list pairs, already in emission order
pub type ListTerms = Vec<(String, Vec<Value>)>;

/// One operator group, or a nested boolean group
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(Terms),
    Ne(Terms),
    Gt(Terms),
    Gte(Terms),
    Lt(Terms),
    Lte(Terms),
    Like(Terms),
    NotLike(Terms),
    In(ListTerms),
    NotIn(ListTerms),
    /// Fields whose range is not exactly two bounds are skipped
    Between(ListTerms),
    NotBetween(ListTerms),
    Null(Vec<(String, NullType)>),
    /// Children joined by `and`, parenthesized
    Nest(Vec<Condition>),
    /// Children joined by `or`, parenthesized
    Or(Vec<Condition>),
}

impl Condition {
    /// Renders text fragments and their aligned values
    pub fn render(&self) -> (Vec<String>, Vec<Value>) {
        match self {
            Condition::Eq(terms) => render_compare(terms, Operator::Eq),
            Condition::Ne(terms) => render_compare(terms, Operator::Ne),
            Condition::Gt(terms) => render_compare(terms, Operator::Gt),
            Condition::Gte(terms) => render_compare(terms, Operator::Gte),
            Condition::Lt(terms) => render_compare(terms, Operator::Lt),
            Condition::Lte(terms) => render_compare(terms, Operator::Lte),
            Condition::Like(terms) => render_compare(terms, Operator::Like),
            Condition::NotLike(terms) => render_compare(terms, Operator::NotLike),
            Condition::In(terms) => render_in(terms, Operator::In),
            Condition::NotIn(terms) => render_in(terms, Operator::NotIn),
            Condition::Between(terms) => render_between(terms, Operator::Between),
            Condition::NotBetween(terms) => render_between(terms, Operator::NotBetween),
            Condition::Null(terms) => {
                let cond = terms
                    .iter()
                    .map(|(field, marker)| format!("{} {}", field, marker))
                    .collect();
                (cond, Vec::new())
            }
            Condition::Nest(children) => render_group("and", children),
            Condition::Or(children) => render_group("or", children),
        }
    }
}

fn render_compare(terms: &Terms, op: Operator) -> (Vec<String>, Vec<Value>) {
    let symbol = op.symbol();
    let mut cond = Vec::with_capacity(terms.len());
    let mut vals = Vec::with_capacity(terms.len());
    for (field, value) in terms {
        let mut text = String::with_capacity(field.len() + symbol.len() + 1);
        text.push_str(field);
        text.push_str(symbol);
        text.push('?');
        cond.push(text);
        vals.push(value.clone());
    }
    (cond, vals)
}

fn render_in(terms: &ListTerms, op: Operator) -> (Vec<String>, Vec<Value>) {
    let mut cond = Vec::with_capacity(terms.len());
    let mut vals = Vec::new();
    for (field, values) in terms {
        let mut text = String::with_capacity(field.len() + values.len() * 2 + 9);
        text.push_str(field);
        text.push_str(op.symbol());
        text.push_str(&placeholders(values.len()));
        cond.push(text);
        vals.extend(values.iter().cloned());
    }
    (cond, vals)
}

fn render_between(terms: &ListTerms, op: Operator) -> (Vec<String>, Vec<Value>) {
    let mut cond = Vec::with_capacity(terms.len());
    let mut vals = Vec::new();
    for (field, values) in terms {
        if values.len() != 2 {
            continue;
        }
        cond.push(format!("({}{}? and ?)", field, op.symbol()));
        vals.extend(values.iter().cloned());
    }
    (cond, vals)
}

fn render_group(connective: &str, children: &[Condition]) -> (Vec<String>, Vec<Value>) {
    let (text, vals) = connect(connective, children);
    if text.is_empty() {
        return (Vec::new(), Vec::new());
    }
    (vec![text], vals)
}

/// Joins rendered conditions with `connective`, wrapped in parentheses
///
/// Conditions rendering no text contribute nothing. Returns an empty string
/// (never `()`) when nothing rendered.
pub fn connect(connective: &str, conditions: &[Condition]) -> (String, Vec<Value>) {
    let mut parts = Vec::new();
    let mut values = Vec::new();
    for condition in conditions {
        let (cond, vals) = condition.render();
        if cond.is_empty() {
            continue;
        }
        parts.extend(cond);
        values.extend(vals);
    }
    if parts.is_empty() {
        return (String::new(), Vec::new());
    }

    let separator = format!(" {} ", connective);
    let capacity = parts
        .iter()
        .map(|p| p.len() + separator.len())
        .sum::<usize>();
    let mut text = String::with_capacity(capacity + 2);
    text.push('(');
    text.push_str(&parts.join(&separator));
    text.push(')');
    (text, values)
}

/// `(?,?,...)` with `n` placeholders; `()` when `n` is zero
pub fn placeholders(n: usize) -> String {
    let mut s = String::with_capacity(n * 2 + 1);
    s.push('(');
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        s.push('?');
    }
    s.push(')');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(pairs: &[(&str, i32)]) -> Terms {
        pairs
            .iter()
            .map(|(f, v)| (f.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_eq_render() {
        let (cond, vals) = Condition::Eq(terms(&[("baz", 1), ("foo", 2)])).render();
        assert_eq!(cond, vec!["baz=?", "foo=?"]);
        assert_eq!(vals, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_ltgt_renders_bang_equal() {
        let (cond, _) = Condition::Ne(terms(&[("qq", 1)])).render();
        assert_eq!(cond, vec!["qq!=?"]);
    }

    #[test]
    fn test_in_render() {
        let c = Condition::In(vec![
            ("age".to_string(), vec![Value::from(5), Value::from(7), Value::from(9)]),
            ("foo".to_string(), vec![Value::from("bar")]),
        ]);
        let (cond, vals) = c.render();
        assert_eq!(cond, vec!["age in (?,?,?)", "foo in (?)"]);
        assert_eq!(vals.len(), 4);
    }

    #[test]
    fn test_between_skips_malformed_range() {
        let c = Condition::NotBetween(vec![
            ("age".to_string(), vec![Value::from(1), Value::from(2)]),
            ("bad".to_string(), vec![Value::from(1)]),
        ]);
        let (cond, vals) = c.render();
        assert_eq!(cond, vec!["(age not between ? and ?)"]);
        assert_eq!(vals, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_null_has_no_values() {
        let c = Condition::Null(vec![
            ("aa".to_string(), NullType::IsNull),
            ("bb".to_string(), NullType::IsNotNull),
        ]);
        let (cond, vals) = c.render();
        assert_eq!(cond, vec!["aa is null", "bb is not null"]);
        assert!(vals.is_empty());
    }

    #[test]
    fn test_nest_and_or() {
        let nest = Condition::Nest(vec![
            Condition::Eq(terms(&[("aa", 3)])),
            Condition::Eq(terms(&[("bb", 4)])),
        ]);
        let (cond, vals) = nest.render();
        assert_eq!(cond, vec!["(aa=? and bb=?)"]);
        assert_eq!(vals, vec![Value::Int(3), Value::Int(4)]);

        let or = Condition::Or(vec![
            nest,
            Condition::Nest(vec![Condition::Gt(terms(&[("cc", 5)]))]),
        ]);
        let (cond, _) = or.render();
        assert_eq!(cond, vec!["((aa=? and bb=?) or (cc>?))"]);
    }

    #[test]
    fn test_empty_groups_vanish() {
        let or = Condition::Or(vec![Condition::Nest(vec![]), Condition::Nest(vec![])]);
        assert_eq!(or.render(), (Vec::new(), Vec::new()));
        assert_eq!(connect("and", &[or]), (String::new(), Vec::new()));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(0), "()");
        assert_eq!(placeholders(1), "(?)");
        assert_eq!(placeholders(3), "(?,?,?)");
    }
}
