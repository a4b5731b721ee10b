//! Operator bucketing and `_or` recursion
//!
//! One pass over a predicate map sorts every entry into a bucket keyed by
//! operator. Buckets are then turned into conditions in operator-table
//! order, fields sorted within each bucket.

use std::collections::HashMap;

use tracing::{trace, warn};

use super::compiler::Compiler;
use super::condition::{Condition, ListTerms, Terms};
use super::config::BetweenPolicy;
use super::directive::{is_directive, OR};
use super::errors::{BuilderError, BuilderResult};
use super::operator::{parse_key, Operator, OPERATOR_TABLE};
use super::value::{NullType, WhereMap, WhereValue};

/// Entries of one predicate map level, grouped by operator
#[derive(Debug, Default)]
struct WhereSet {
    set: HashMap<Operator, HashMap<String, WhereValue>>,
}

impl WhereSet {
    /// Later writes for the same operator and field replace earlier ones
    fn add(&mut self, op: Operator, field: String, value: WhereValue) {
        self.set.entry(op).or_default().insert(field, value);
    }
}

/// Compiles one predicate map level into conditions
///
/// The `_or` group, if any, comes first, followed by one condition per
/// populated operator bucket. `depth` counts the `_or` levels above this map.
pub(crate) fn where_conditions(
    compiler: &Compiler,
    where_map: &WhereMap,
    depth: usize,
) -> BuilderResult<Vec<Condition>> {
    let mut conditions = Vec::new();
    let mut where_set = WhereSet::default();

    for (key, value) in where_map {
        if is_directive(key) {
            continue;
        }
        if key == OR {
            conditions.push(or_condition(compiler, value, depth)?);
            continue;
        }

        let parsed = parse_key(key, value)?;
        trace!(field = %parsed.field, operator = %parsed.operator, "bucketed predicate");
        where_set.add(parsed.operator, parsed.field, value.clone());
    }

    for (_, op) in OPERATOR_TABLE {
        if let Some(bucket) = where_set.set.remove(&op) {
            conditions.push(produce(compiler, op, bucket)?);
        }
    }

    Ok(conditions)
}

fn or_condition(compiler: &Compiler, value: &WhereValue, depth: usize) -> BuilderResult<Condition> {
    let WhereValue::Or(groups) = value else {
        return Err(BuilderError::OrValueType);
    };
    if let Some(max) = compiler.config().max_or_depth {
        if depth + 1 > max {
            return Err(BuilderError::OrTooDeep { max });
        }
    }

    let nested = groups
        .iter()
        .map(|group| where_conditions(compiler, group, depth + 1).map(Condition::Nest))
        .collect::<BuilderResult<Vec<_>>>()?;
    Ok(Condition::Or(nested))
}

/// Turns one bucket into its condition
fn produce(
    compiler: &Compiler,
    op: Operator,
    bucket: HashMap<String, WhereValue>,
) -> BuilderResult<Condition> {
    let mut entries: Vec<(String, WhereValue)> = bucket.into_iter().collect();
    entries.sort_by(|a, b| compiler.compare_fields(&a.0, &b.0));

    let condition = match op {
        Operator::Eq => Condition::Eq(scalar_terms(op, entries)?),
        Operator::Ne | Operator::LtGt => Condition::Ne(scalar_terms(op, entries)?),
        Operator::Gt => Condition::Gt(scalar_terms(op, entries)?),
        Operator::Gte => Condition::Gte(scalar_terms(op, entries)?),
        Operator::Lt => Condition::Lt(scalar_terms(op, entries)?),
        Operator::Lte => Condition::Lte(scalar_terms(op, entries)?),
        Operator::Like => Condition::Like(scalar_terms(op, entries)?),
        Operator::NotLike => Condition::NotLike(scalar_terms(op, entries)?),
        Operator::In => Condition::In(list_terms(op, entries)?),
        Operator::NotIn => Condition::NotIn(list_terms(op, entries)?),
        Operator::Between => Condition::Between(range_terms(compiler, op, entries)?),
        Operator::NotBetween => Condition::NotBetween(range_terms(compiler, op, entries)?),
        Operator::Null => Condition::Null(null_terms(entries)),
    };
    Ok(condition)
}

fn scalar_terms(op: Operator, entries: Vec<(String, WhereValue)>) -> BuilderResult<Terms> {
    entries
        .into_iter()
        .map(|(field, value)| match value {
            WhereValue::Scalar(v) => Ok((field, v)),
            _ => Err(BuilderError::ScalarValueType {
                operator: op.token().to_string(),
                field,
            }),
        })
        .collect()
}

fn list_terms(op: Operator, entries: Vec<(String, WhereValue)>) -> BuilderResult<ListTerms> {
    entries
        .into_iter()
        .map(|(field, value)| {
            let items = value
                .elements()
                .ok_or_else(|| BuilderError::list_value_type(op.token()))?;
            if items.is_empty() {
                return Err(BuilderError::empty_list(op.token()));
            }
            Ok((field, items))
        })
        .collect()
}

fn range_terms(
    compiler: &Compiler,
    op: Operator,
    entries: Vec<(String, WhereValue)>,
) -> BuilderResult<ListTerms> {
    let terms = list_terms(op, entries)?;
    for (field, items) in &terms {
        if items.len() == 2 {
            continue;
        }
        match compiler.config().between_policy {
            BetweenPolicy::Reject => {
                return Err(BuilderError::BetweenArity {
                    field: field.clone(),
                    found: items.len(),
                })
            }
            BetweenPolicy::Skip => {
                warn!(
                    field = %field,
                    found = items.len(),
                    operator = %op,
                    "skipping malformed range"
                );
            }
        }
    }
    Ok(terms)
}

fn null_terms(entries: Vec<(String, WhereValue)>) -> Vec<(String, NullType)> {
    entries
        .into_iter()
        .filter_map(|(field, value)| match value {
            WhereValue::Null(marker) => Some((field, marker)),
            _ => None,
        })
        .collect()
}
