//! Typed predicate values
//!
//! Every value is classified when it enters the builder: a bound scalar, an
//! ordered list, a two-bound range, a null marker, a nested `_or` group or a
//! directive payload. Nothing downstream inspects runtime types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::directive::{FillType, Interval};

/// A predicate map: keys are `"field"`, `"field operator"` or directive names
pub type WhereMap = BTreeMap<String, WhereValue>;

/// A scalar bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL null
    Null,
    /// Boolean
    Bool(bool),
    /// Unsigned integer
    UInt(u64),
    /// Signed integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// Text
    Text(String),
}

impl Value {
    /// Returns the value as an unsigned integer, if it is one
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(v) => Some(*v),
            Value::Int(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Returns the value as a float, if it is numeric
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::UInt(v) => Some(*v as f64),
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// True for the zero value of the variant
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::UInt(v) => *v == 0,
            Value::Int(v) => *v == 0,
            Value::Float(v) => *v == 0.0,
            Value::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{:?}", v),
        }
    }
}

/// Null markers usable as a predicate value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullType {
    /// `field is null`
    IsNull,
    /// `field is not null`
    IsNotNull,
}

impl NullType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NullType::IsNull => "is null",
            NullType::IsNotNull => "is not null",
        }
    }
}

impl fmt::Display for NullType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value side of a predicate map entry
#[derive(Debug, Clone, PartialEq)]
pub enum WhereValue {
    /// Single bound value
    Scalar(Value),
    /// Ordered collection (`in`, `not in`, `between`)
    List(Vec<Value>),
    /// Two-bound range (`between`, `not between`)
    Range(Value, Value),
    /// `is null` / `is not null`
    Null(NullType),
    /// Nested predicate maps joined by `or`
    Or(Vec<WhereMap>),
    /// `_interval` payload
    Interval(Interval),
    /// `_fill` payload
    Fill(FillType),
}

impl WhereValue {
    /// Builds a two-bound range
    pub fn range(low: impl Into<Value>, high: impl Into<Value>) -> Self {
        WhereValue::Range(low.into(), high.into())
    }

    /// Builds an `_or` group from nested maps
    pub fn or(groups: impl IntoIterator<Item = WhereMap>) -> Self {
        WhereValue::Or(groups.into_iter().collect())
    }

    /// True for list and range values
    pub fn is_collection(&self) -> bool {
        matches!(self, WhereValue::List(_) | WhereValue::Range(..))
    }

    /// Collection elements in order, if this is a list or range
    pub fn elements(&self) -> Option<Vec<Value>> {
        match self {
            WhereValue::List(items) => Some(items.clone()),
            WhereValue::Range(low, high) => Some(vec![low.clone(), high.clone()]),
            _ => None,
        }
    }

    /// True for the zero value of the variant
    ///
    /// Null markers, ranges and fill policies are never zero.
    pub fn is_zero(&self) -> bool {
        match self {
            WhereValue::Scalar(v) => v.is_zero(),
            WhereValue::List(items) => items.is_empty(),
            WhereValue::Or(groups) => groups.is_empty(),
            WhereValue::Interval(interval) => interval.value == 0,
            WhereValue::Range(..) | WhereValue::Null(_) | WhereValue::Fill(_) => false,
        }
    }
}

/// A named-template parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Replaced by a single `?`
    One(Value),
    /// Replaced by `(?,?,...)`, one placeholder per element
    Many(Vec<Value>),
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }

            impl From<$ty> for WhereValue {
                fn from(v: $ty) -> Self {
                    WhereValue::Scalar(Value::from(v))
                }
            }

            impl From<Vec<$ty>> for WhereValue {
                fn from(v: Vec<$ty>) -> Self {
                    WhereValue::List(v.into_iter().map(Value::from).collect())
                }
            }

            impl From<$ty> for Param {
                fn from(v: $ty) -> Self {
                    Param::One(Value::from(v))
                }
            }

            impl From<Vec<$ty>> for Param {
                fn from(v: Vec<$ty>) -> Self {
                    Param::Many(v.into_iter().map(Value::from).collect())
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => UInt,
    u16 => UInt,
    u32 => UInt,
    u64 => UInt,
    f32 => Float,
    f64 => Float,
    &str => Text,
    String => Text,
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<Value> for WhereValue {
    fn from(v: Value) -> Self {
        WhereValue::Scalar(v)
    }
}

impl From<Vec<Value>> for WhereValue {
    fn from(v: Vec<Value>) -> Self {
        WhereValue::List(v)
    }
}

impl From<NullType> for WhereValue {
    fn from(v: NullType) -> Self {
        WhereValue::Null(v)
    }
}

impl From<Interval> for WhereValue {
    fn from(v: Interval) -> Self {
        WhereValue::Interval(v)
    }
}

impl From<FillType> for WhereValue {
    fn from(v: FillType) -> Self {
        WhereValue::Fill(v)
    }
}

impl From<Vec<WhereMap>> for WhereValue {
    fn from(v: Vec<WhereMap>) -> Self {
        WhereValue::Or(v)
    }
}

impl From<Value> for Param {
    fn from(v: Value) -> Self {
        Param::One(v)
    }
}

impl From<Vec<Value>> for Param {
    fn from(v: Vec<Value>) -> Self {
        Param::Many(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Value::from(3), Value::Int(3));
        assert_eq!(Value::from(3u32), Value::UInt(3));
        assert_eq!(Value::from("x"), Value::Text("x".to_string()));
        assert_eq!(WhereValue::from(2.5), WhereValue::Scalar(Value::Float(2.5)));
    }

    #[test]
    fn test_list_conversion_keeps_order() {
        let v = WhereValue::from(vec![5, 1, 3]);
        assert_eq!(
            v.elements(),
            Some(vec![Value::Int(5), Value::Int(1), Value::Int(3)])
        );
        assert!(v.is_collection());
    }

    #[test]
    fn test_range_elements() {
        let v = WhereValue::range(10, 30);
        assert_eq!(v.elements(), Some(vec![Value::Int(10), Value::Int(30)]));
    }

    #[test]
    fn test_zero_values() {
        assert!(WhereValue::from("").is_zero());
        assert!(WhereValue::from(0).is_zero());
        assert!(WhereValue::from(false).is_zero());
        assert!(WhereValue::List(vec![]).is_zero());
        assert!(!WhereValue::Null(NullType::IsNull).is_zero());
        assert!(!WhereValue::from("a").is_zero());
    }

    #[test]
    fn test_value_serializes_untagged() {
        let vals = vec![Value::Int(-1), Value::Text("a".into()), Value::Null];
        assert_eq!(serde_json::to_string(&vals).unwrap(), r#"[-1,"a",null]"#);
    }
}
