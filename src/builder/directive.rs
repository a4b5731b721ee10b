//! Reserved directive keys
//!
//! Directives shape the statement instead of filtering it. They are read
//! from the top-level predicate map before operator bucketing and skipped by
//! it.

use std::fmt;
use std::str::FromStr;

use super::errors::{BuilderError, BuilderResult};
use super::value::{Value, WhereMap, WhereValue};

pub const ORDER_BY: &str = "_orderby";
pub const GROUP_BY: &str = "_groupby";
pub const LIMIT: &str = "_limit";
pub const SLIMIT: &str = "_slimit";
pub const INTERVAL: &str = "_interval";
pub const FILL: &str = "_fill";
pub const FILL_VALUE: &str = "_fillvalue";
pub const OR: &str = "_or";

/// Keys consumed here and skipped by operator bucketing
pub const DIRECTIVE_KEYS: [&str; 7] = [
    ORDER_BY, GROUP_BY, LIMIT, SLIMIT, INTERVAL, FILL, FILL_VALUE,
];

/// Returns true if `key` is a directive key
pub fn is_directive(key: &str) -> bool {
    DIRECTIVE_KEYS.contains(&key)
}

/// Time-bucket unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl IntervalUnit {
    /// Single-letter suffix used in `interval(...)`
    pub fn suffix(&self) -> &'static str {
        match self {
            IntervalUnit::Microsecond => "u",
            IntervalUnit::Millisecond => "a",
            IntervalUnit::Second => "s",
            IntervalUnit::Minute => "m",
            IntervalUnit::Hour => "h",
            IntervalUnit::Day => "d",
            IntervalUnit::Week => "w",
            IntervalUnit::Month => "n",
            IntervalUnit::Year => "y",
        }
    }
}

impl FromStr for IntervalUnit {
    type Err = BuilderError;

    /// Accepts the unit name or its suffix letter
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "u" | "microsecond" => IntervalUnit::Microsecond,
            "a" | "millisecond" => IntervalUnit::Millisecond,
            "s" | "second" => IntervalUnit::Second,
            "m" | "minute" => IntervalUnit::Minute,
            "h" | "hour" => IntervalUnit::Hour,
            "d" | "day" => IntervalUnit::Day,
            "w" | "week" => IntervalUnit::Week,
            "n" | "month" => IntervalUnit::Month,
            "y" | "year" => IntervalUnit::Year,
            _ => return Err(BuilderError::IntervalValueType),
        };
        Ok(unit)
    }
}

/// `_interval` payload: magnitude plus unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub value: u64,
    pub unit: IntervalUnit,
}

impl Interval {
    pub fn new(value: u64, unit: IntervalUnit) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for Interval {
    type Err = BuilderError;

    /// Parses `"5m"` or `"5 minute"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or(BuilderError::IntervalValueType)?;
        let value = s[..split]
            .parse::<u64>()
            .map_err(|_| BuilderError::IntervalValueType)?;
        let unit = s[split..].parse()?;
        Ok(Interval { value, unit })
    }
}

/// `_fill` gap-fill policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillType {
    None,
    /// Requires a companion `_fillvalue`
    Value,
    Prev,
    Null,
    Linear,
    Next,
}

impl FillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FillType::None => "NONE",
            FillType::Value => "VALUE",
            FillType::Prev => "PREV",
            FillType::Null => "NULL",
            FillType::Linear => "LINEAR",
            FillType::Next => "NEXT",
        }
    }
}

impl FromStr for FillType {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fill = match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => FillType::None,
            "VALUE" => FillType::Value,
            "PREV" => FillType::Prev,
            "NULL" => FillType::Null,
            "LINEAR" => FillType::Linear,
            "NEXT" => FillType::Next,
            _ => {
                return Err(BuilderError::UnknownFill {
                    value: s.to_string(),
                })
            }
        };
        Ok(fill)
    }
}

/// Pagination window bound as `?,?`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub begin: u64,
    pub step: u64,
}

impl Limit {
    /// Bound values in placeholder order
    pub fn values(&self) -> [Value; 2] {
        [Value::UInt(self.begin), Value::UInt(self.step)]
    }
}

/// Directives read from one predicate map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directives {
    pub order_by: Option<String>,
    pub group_by: Option<String>,
    pub limit: Option<Limit>,
    pub slimit: Option<Limit>,
    pub interval: Option<Interval>,
    /// Rendered fill clause, e.g. `PREV` or `(VALUE,1.500000)`
    pub fill: Option<String>,
}

impl Directives {
    /// Extracts and validates every directive present in `where_map`
    ///
    /// Checked in the order orderby, groupby, limit, slimit, interval, fill;
    /// the first failure wins.
    pub fn parse(where_map: &WhereMap) -> BuilderResult<Self> {
        let mut directives = Directives::default();

        if let Some(value) = where_map.get(ORDER_BY) {
            directives.order_by = parse_text(value, BuilderError::OrderByValueType)?;
        }
        if let Some(value) = where_map.get(GROUP_BY) {
            directives.group_by = parse_text(value, BuilderError::GroupByValueType)?;
        }
        if let Some(value) = where_map.get(LIMIT) {
            directives.limit = Some(parse_limit(
                value,
                BuilderError::LimitValueType,
                BuilderError::LimitValueLength,
            )?);
        }
        if let Some(value) = where_map.get(SLIMIT) {
            directives.slimit = Some(parse_limit(
                value,
                BuilderError::SLimitValueType,
                BuilderError::SLimitValueLength,
            )?);
        }
        if let Some(value) = where_map.get(INTERVAL) {
            let WhereValue::Interval(interval) = value else {
                return Err(BuilderError::IntervalValueType);
            };
            if interval.value == 0 {
                return Err(BuilderError::IntervalValue);
            }
            directives.interval = Some(*interval);
        }
        if let Some(value) = where_map.get(FILL) {
            directives.fill = Some(parse_fill(value, where_map.get(FILL_VALUE))?);
        }

        Ok(directives)
    }
}

/// Trimmed text; blank text means the clause is omitted
fn parse_text(value: &WhereValue, err: BuilderError) -> BuilderResult<Option<String>> {
    match value {
        WhereValue::Scalar(Value::Text(s)) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_string()))
        }
        _ => Err(err),
    }
}

/// `[n]` is normalized to `[0, n]`
fn parse_limit(
    value: &WhereValue,
    type_err: BuilderError,
    len_err: BuilderError,
) -> BuilderResult<Limit> {
    let WhereValue::List(items) = value else {
        return Err(type_err);
    };
    let bounds = items
        .iter()
        .map(|v| v.as_u64().ok_or_else(|| type_err.clone()))
        .collect::<BuilderResult<Vec<u64>>>()?;

    match bounds.as_slice() {
        [step] => Ok(Limit { begin: 0, step: *step }),
        [begin, step] => Ok(Limit {
            begin: *begin,
            step: *step,
        }),
        _ => Err(len_err),
    }
}

fn parse_fill(value: &WhereValue, fill_value: Option<&WhereValue>) -> BuilderResult<String> {
    let WhereValue::Fill(fill) = value else {
        return Err(BuilderError::FillValueType);
    };
    if *fill != FillType::Value {
        return Ok(fill.as_str().to_string());
    }

    let fill_value = fill_value.ok_or(BuilderError::FillMissingValue)?;
    let v = match fill_value {
        WhereValue::Scalar(v) => v.as_f64().ok_or(BuilderError::FillValueValueType)?,
        _ => return Err(BuilderError::FillValueValueType),
    };
    Ok(format!("(VALUE,{:.6})", v))
}
