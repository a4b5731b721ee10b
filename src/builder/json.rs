//! JSON boundary
//!
//! Converts untyped JSON documents into the typed predicate model. Shape
//! decisions happen here once:
//!
//! - `null` becomes an `is null` marker, `{"$null": false}` an `is not null`
//!   marker
//! - arrays become lists, `_or` arrays become nested predicate maps with
//!   `null` members skipped
//! - `_interval` accepts `"5m"` or `{"value": 5, "unit": "minute"}`
//! - `_fill` accepts a policy name
//! - non-negative integers become unsigned, negative ones signed
//!
//! Directive payloads of the wrong shape are passed through as plain values
//! so the compiler reports the directive-specific error.

use std::collections::HashMap;

use serde_json::{Map, Value as Json};

use super::directive::{FillType, Interval, IntervalUnit, FILL, INTERVAL, OR};
use super::errors::{BuilderError, BuilderResult};
use super::value::{NullType, Param, Value, WhereMap, WhereValue};

/// Object key selecting a null marker
pub const NULL_MARKER_KEY: &str = "$null";

/// Converts a JSON object into a predicate map
pub fn where_from_json(json: &Json) -> BuilderResult<WhereMap> {
    let object = json
        .as_object()
        .ok_or_else(|| invalid("where must be an object"))?;

    object
        .iter()
        .map(|(key, value)| -> BuilderResult<(String, WhereValue)> {
            let converted = match key.as_str() {
                OR => or_from_json(value)?,
                INTERVAL => interval_from_json(value)?,
                FILL => fill_from_json(value)?,
                _ => where_value_from_json(key, value)?,
            };
            Ok((key.clone(), converted))
        })
        .collect()
}

/// Converts a JSON array of arrays into insert rows
pub fn rows_from_json(json: &Json) -> BuilderResult<Vec<Vec<Value>>> {
    let rows = json
        .as_array()
        .ok_or_else(|| invalid("rows must be an array of arrays"))?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| -> BuilderResult<Vec<Value>> {
            row.as_array()
                .ok_or_else(|| invalid(format!("row {} must be an array", i)))?
                .iter()
                .map(scalar_from_json)
                .collect()
        })
        .collect()
}

/// Converts a JSON object into named-template parameters
pub fn params_from_json(json: &Json) -> BuilderResult<HashMap<String, Param>> {
    let object = json
        .as_object()
        .ok_or_else(|| invalid("params must be an object"))?;

    object
        .iter()
        .map(|(name, value)| -> BuilderResult<(String, Param)> {
            let param = match value {
                Json::Array(items) => Param::Many(
                    items
                        .iter()
                        .map(scalar_from_json)
                        .collect::<BuilderResult<_>>()?,
                ),
                other => Param::One(scalar_from_json(other)?),
            };
            Ok((name.clone(), param))
        })
        .collect()
}

/// Converts a JSON scalar into a bound value
pub fn scalar_from_json(json: &Json) -> BuilderResult<Value> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok(Value::UInt(u))
            } else if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else {
                n.as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| invalid(format!("unrepresentable number {}", n)))
            }
        }
        Json::String(s) => Ok(Value::Text(s.clone())),
        Json::Array(_) | Json::Object(_) => Err(invalid("expected a scalar value")),
    }
}

fn where_value_from_json(key: &str, json: &Json) -> BuilderResult<WhereValue> {
    match json {
        Json::Null => Ok(WhereValue::Null(NullType::IsNull)),
        Json::Array(items) => Ok(WhereValue::List(
            items
                .iter()
                .map(scalar_from_json)
                .collect::<BuilderResult<_>>()?,
        )),
        Json::Object(object) => null_marker(object)
            .map(WhereValue::Null)
            .ok_or_else(|| invalid(format!("unsupported object value for {:?}", key))),
        other => Ok(WhereValue::Scalar(scalar_from_json(other)?)),
    }
}

fn null_marker(object: &Map<String, Json>) -> Option<NullType> {
    if object.len() != 1 {
        return None;
    }
    match object.get(NULL_MARKER_KEY)? {
        Json::Bool(true) => Some(NullType::IsNull),
        Json::Bool(false) => Some(NullType::IsNotNull),
        _ => None,
    }
}

fn or_from_json(json: &Json) -> BuilderResult<WhereValue> {
    match json {
        Json::Array(groups) => Ok(WhereValue::Or(
            groups
                .iter()
                .filter(|group| !group.is_null())
                .map(|group| match group {
                    Json::Object(_) => where_from_json(group),
                    _ => Err(BuilderError::OrValueType),
                })
                .collect::<BuilderResult<_>>()?,
        )),
        Json::Object(_) => Err(BuilderError::OrValueType),
        other => where_value_from_json(OR, other),
    }
}

fn interval_from_json(json: &Json) -> BuilderResult<WhereValue> {
    match json {
        Json::String(s) => Ok(WhereValue::Interval(s.parse()?)),
        Json::Object(object) => {
            let value = object
                .get("value")
                .and_then(Json::as_u64)
                .ok_or(BuilderError::IntervalValueType)?;
            let unit = object
                .get("unit")
                .and_then(Json::as_str)
                .ok_or(BuilderError::IntervalValueType)?
                .parse::<IntervalUnit>()?;
            Ok(WhereValue::Interval(Interval::new(value, unit)))
        }
        other => where_value_from_json(INTERVAL, other),
    }
}

fn fill_from_json(json: &Json) -> BuilderResult<WhereValue> {
    match json {
        Json::String(s) => Ok(WhereValue::Fill(s.parse::<FillType>()?)),
        other => where_value_from_json(FILL, other),
    }
}

fn invalid(message: impl Into<String>) -> BuilderError {
    BuilderError::InvalidRequest(message.into())
}
