//! Builder error types
//!
//! Every failure is a local, deterministic validation error. Nothing here is
//! retryable: the builder performs no I/O.

use thiserror::Error;

/// Result type for builder operations
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Errors produced while compiling a statement
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    // ==================
    // Predicate keys
    // ==================
    /// Key was empty after trimming
    #[error("couldn't split an empty key")]
    EmptyKey,

    /// Operator token is not in the supported list
    #[error("unsupported operator: {operator:?}")]
    UnsupportedOperator { operator: String },

    /// `_or` value was not a list of predicate maps
    #[error(r#"the value of "_or" must be a list of predicate maps"#)]
    OrValueType,

    /// `_or` nesting exceeded the configured depth
    #[error(r#""_or" nesting exceeds depth {max}"#)]
    OrTooDeep { max: usize },

    // ==================
    // Operator values
    // ==================
    /// Set-style operator received something other than a list
    #[error(r#"the value of "xxx {operator}" must be a list"#)]
    ListValueType { operator: String },

    /// Set-style operator received an empty list
    #[error(r#"the value of "{operator}" must contain at least one element"#)]
    EmptyListCondition { operator: String },

    /// Scalar operator received a collection or directive value
    #[error(r#"the value of "{field} {operator}" must be a scalar"#)]
    ScalarValueType { operator: String, field: String },

    /// Between range did not have exactly two bounds (reject policy only)
    #[error(r#"the value of "{field} between" must contain two elements, got {found}"#)]
    BetweenArity { field: String, found: usize },

    // ==================
    // Directives
    // ==================
    #[error(r#"the value of "_orderby" must be text"#)]
    OrderByValueType,

    #[error(r#"the value of "_groupby" must be text"#)]
    GroupByValueType,

    #[error(r#"the value of "_limit" must be a list of unsigned integers"#)]
    LimitValueType,

    #[error(r#"the value of "_limit" must contain one or two elements"#)]
    LimitValueLength,

    #[error(r#"the value of "_slimit" must be a list of unsigned integers"#)]
    SLimitValueType,

    #[error(r#"the value of "_slimit" must contain one or two elements"#)]
    SLimitValueLength,

    #[error(r#"the value of "_interval" must be an interval"#)]
    IntervalValueType,

    /// Interval magnitude was zero
    #[error(r#"the value of "_interval" must have a positive magnitude"#)]
    IntervalValue,

    #[error(r#"the value of "_fill" must be a fill policy"#)]
    FillValueType,

    /// Fill policy name not in NONE, VALUE, PREV, NULL, LINEAR, NEXT
    #[error(r#"unknown "_fill" policy {value:?}"#)]
    UnknownFill { value: String },

    #[error(r#""_fill" is VALUE but "_fillvalue" is missing"#)]
    FillMissingValue,

    #[error(r#"the value of "_fillvalue" must be numeric"#)]
    FillValueValueType,

    // ==================
    // Templates and inserts
    // ==================
    /// Template referenced a name absent from the parameter map
    #[error("{name} not found")]
    NameNotFound { name: String },

    /// Insert was called without rows
    #[error("insert null data")]
    InsertNoRows,

    /// Insert row arity differs from the first row
    #[error("row {row} has {found} values, expected {expected}")]
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },

    // ==================
    // Boundaries
    // ==================
    /// Malformed JSON request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Malformed compiler configuration
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl BuilderError {
    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            BuilderError::EmptyKey => "QM_EMPTY_KEY",
            BuilderError::UnsupportedOperator { .. } => "QM_UNSUPPORTED_OPERATOR",
            BuilderError::OrValueType => "QM_OR_VALUE_TYPE",
            BuilderError::OrTooDeep { .. } => "QM_OR_TOO_DEEP",
            BuilderError::ListValueType { .. } => "QM_LIST_VALUE_TYPE",
            BuilderError::EmptyListCondition { .. } => "QM_EMPTY_LIST_CONDITION",
            BuilderError::ScalarValueType { .. } => "QM_SCALAR_VALUE_TYPE",
            BuilderError::BetweenArity { .. } => "QM_BETWEEN_ARITY",
            BuilderError::OrderByValueType => "QM_ORDERBY_VALUE_TYPE",
            BuilderError::GroupByValueType => "QM_GROUPBY_VALUE_TYPE",
            BuilderError::LimitValueType => "QM_LIMIT_VALUE_TYPE",
            BuilderError::LimitValueLength => "QM_LIMIT_VALUE_LENGTH",
            BuilderError::SLimitValueType => "QM_SLIMIT_VALUE_TYPE",
            BuilderError::SLimitValueLength => "QM_SLIMIT_VALUE_LENGTH",
            BuilderError::IntervalValueType => "QM_INTERVAL_VALUE_TYPE",
            BuilderError::IntervalValue => "QM_INTERVAL_VALUE",
            BuilderError::FillValueType => "QM_FILL_VALUE_TYPE",
            BuilderError::UnknownFill { .. } => "QM_UNKNOWN_FILL",
            BuilderError::FillMissingValue => "QM_FILL_MISSING_VALUE",
            BuilderError::FillValueValueType => "QM_FILLVALUE_VALUE_TYPE",
            BuilderError::NameNotFound { .. } => "QM_NAME_NOT_FOUND",
            BuilderError::InsertNoRows => "QM_INSERT_NO_ROWS",
            BuilderError::RowArity { .. } => "QM_ROW_ARITY",
            BuilderError::InvalidRequest(_) => "QM_INVALID_REQUEST",
            BuilderError::InvalidConfig(_) => "QM_INVALID_CONFIG",
        }
    }

    pub(crate) fn list_value_type(operator: &str) -> Self {
        BuilderError::ListValueType {
            operator: operator.to_string(),
        }
    }

    pub(crate) fn empty_list(operator: &str) -> Self {
        BuilderError::EmptyListCondition {
            operator: operator.to_string(),
        }
    }
}
