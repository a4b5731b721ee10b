//! # Statement Builder
//!
//! Deterministic compilation of predicate maps into `?`-parameterized
//! statements plus their ordered bound values.
//!
//! A predicate map entry is keyed by `"field"` or `"field operator"`.
//! Entries are grouped by operator and emitted in a fixed operator order,
//! fields sorted within each group, so equal inputs always compile to equal
//! output regardless of map iteration order.
//!
//! Reserved directive keys (`_orderby`, `_groupby`, `_limit`, `_slimit`,
//! `_interval`, `_fill`, `_fillvalue`) shape the statement; `_or` nests
//! predicate maps joined by `or`.
//!
//! ```
//! use querymap::builder::{build_select, WhereMap, WhereValue};
//!
//! let mut where_map = WhereMap::new();
//! where_map.insert("city".to_string(), WhereValue::from("beijing"));
//! where_map.insert("age >".to_string(), WhereValue::from(18));
//!
//! let stmt = build_select("users", &where_map, &["name"]).unwrap();
//! assert_eq!(stmt.text, "select name from users where (city=? and age>?)");
//! assert_eq!(stmt.values.len(), 2);
//! ```

mod aggregate;
mod bucket;
mod compiler;
mod condition;
mod config;
mod directive;
mod errors;
pub mod json;
mod named;
mod omit;
mod operator;
mod statement;
mod value;

pub use aggregate::Aggregate;
pub use compiler::{build_insert, build_insert_with_tags, build_select, Compiler, FieldOrder};
pub use condition::{connect, placeholders, Condition};
pub use config::{BetweenPolicy, CompilerConfig, FieldOrdering};
pub use directive::{
    is_directive, Directives, FillType, Interval, IntervalUnit, Limit, DIRECTIVE_KEYS, FILL,
    FILL_VALUE, GROUP_BY, INTERVAL, LIMIT, OR, ORDER_BY, SLIMIT,
};
pub use errors::{BuilderError, BuilderResult};
pub use json::{params_from_json, rows_from_json, where_from_json};
pub use named::named_query;
pub use omit::omit_empty;
pub use operator::{parse_key, split_key, Operator, ParsedKey, OPERATOR_TABLE};
pub use statement::Statement;
pub use value::{NullType, Param, Value, WhereMap, WhereValue};
