//! Key splitting and the operator table
//!
//! A predicate key is `"field"` or `"field operator"`. The operator token is
//! case-folded and whitespace-collapsed before lookup; the field name is kept
//! verbatim.

use std::fmt;

use super::errors::{BuilderError, BuilderResult};
use super::value::WhereValue;

/// Supported comparison operators
///
/// `Null` is internal: any entry whose value is a null marker lands there
/// regardless of the operator written in its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Eq,
    In,
    /// `!=`
    Ne,
    /// `<>`, rendered as `!=`
    LtGt,
    NotIn,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    Between,
    NotBetween,
    Null,
}

/// Emission order of operator groups, paired with the accepted key token.
///
/// The position in this table fixes where each group lands in the `and`
/// chain, independent of map iteration order.
pub const OPERATOR_TABLE: [(&str, Operator); 14] = [
    ("=", Operator::Eq),
    ("in", Operator::In),
    ("!=", Operator::Ne),
    ("<>", Operator::LtGt),
    ("not in", Operator::NotIn),
    (">", Operator::Gt),
    (">=", Operator::Gte),
    ("<", Operator::Lt),
    ("<=", Operator::Lte),
    ("like", Operator::Like),
    ("not like", Operator::NotLike),
    ("between", Operator::Between),
    ("not between", Operator::NotBetween),
    ("null", Operator::Null),
];

impl Operator {
    /// Looks up a normalized token
    pub fn from_token(token: &str) -> Option<Operator> {
        OPERATOR_TABLE
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, op)| *op)
    }

    /// Key token for this operator
    pub fn token(&self) -> &'static str {
        OPERATOR_TABLE
            .iter()
            .find(|(_, op)| op == self)
            .map(|(t, _)| *t)
            .unwrap_or("null")
    }

    /// Text placed between field and placeholder for comparison operators
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne | Operator::LtGt => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::In => " in ",
            Operator::NotIn => " not in ",
            Operator::Like => " like ",
            Operator::NotLike => " not like ",
            Operator::Between => " between ",
            Operator::NotBetween => " not between ",
            Operator::Null => " ",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A parsed predicate key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub field: String,
    pub operator: Operator,
}

/// Splits `key` into field and normalized operator token
///
/// Without an operator the token defaults to `in` for collections (lists and
/// ranges) and `=` for everything else.
pub fn split_key(key: &str, value: &WhereValue) -> BuilderResult<(String, String)> {
    let key = key.trim_matches(' ');
    if key.is_empty() {
        return Err(BuilderError::EmptyKey);
    }

    match key.find(' ') {
        None => {
            let token = if value.is_collection() { "in" } else { "=" };
            Ok((key.to_string(), token.to_string()))
        }
        Some(idx) => {
            let field = &key[..idx];
            let token = collapse_spaces(&key[idx + 1..]).to_lowercase();
            Ok((field.to_string(), token))
        }
    }
}

/// Parses a key into a field and supported operator
///
/// Null markers are rerouted to [`Operator::Null`] after the literal token
/// has been validated.
pub fn parse_key(key: &str, value: &WhereValue) -> BuilderResult<ParsedKey> {
    let (field, token) = split_key(key, value)?;
    let operator = Operator::from_token(&token)
        .filter(|op| *op != Operator::Null)
        .ok_or(BuilderError::UnsupportedOperator { operator: token })?;

    let operator = match value {
        WhereValue::Null(_) => Operator::Null,
        _ => operator,
    };

    Ok(ParsedKey { field, operator })
}

/// Collapses runs of whitespace into single spaces
fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::value::NullType;

    fn scalar() -> WhereValue {
        WhereValue::from(1)
    }

    #[test]
    fn test_split_without_operator() {
        assert_eq!(
            split_key("name", &scalar()).unwrap(),
            ("name".to_string(), "=".to_string())
        );
        assert_eq!(
            split_key("age", &WhereValue::from(vec![1, 2])).unwrap(),
            ("age".to_string(), "in".to_string())
        );
        assert_eq!(
            split_key("age", &WhereValue::range(1, 2)).unwrap(),
            ("age".to_string(), "in".to_string())
        );
    }

    #[test]
    fn test_split_collapses_inner_whitespace() {
        let (field, op) = split_key(" hobbies  not   IN   ", &scalar()).unwrap();
        assert_eq!(field, "hobbies");
        assert_eq!(op, "not in");
    }

    #[test]
    fn test_field_case_preserved() {
        let parsed = parse_key("UserName LIKE", &WhereValue::from("a%")).unwrap();
        assert_eq!(parsed.field, "UserName");
        assert_eq!(parsed.operator, Operator::Like);
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(split_key("   ", &scalar()), Err(BuilderError::EmptyKey));
    }

    #[test]
    fn test_unsupported_operator() {
        assert_eq!(
            parse_key("age ~", &scalar()),
            Err(BuilderError::UnsupportedOperator {
                operator: "~".to_string()
            })
        );
        // the internal pseudo-operator is not a valid key token
        assert!(parse_key("age null", &scalar()).is_err());
    }

    #[test]
    fn test_null_marker_reroutes() {
        let parsed = parse_key("deleted_at !=", &WhereValue::Null(NullType::IsNull)).unwrap();
        assert_eq!(parsed.operator, Operator::Null);
    }

    #[test]
    fn test_table_order_is_emission_order() {
        let tokens: Vec<&str> = OPERATOR_TABLE.iter().map(|(t, _)| *t).collect();
        assert_eq!(tokens[0], "=");
        assert_eq!(tokens[1], "in");
        assert_eq!(*tokens.last().unwrap(), "null");
        assert_eq!(Operator::LtGt.symbol(), "!=");
    }
}
