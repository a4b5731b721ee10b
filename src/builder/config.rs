//! Compiler configuration
//!
//! Loaded from JSON by the CLI; every field has a default so an empty object
//! is a valid config.

use serde::{Deserialize, Serialize};

use super::errors::{BuilderError, BuilderResult};

/// Order of fields within one operator group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrdering {
    #[default]
    Ascending,
    Descending,
}

/// What to do with a between range that is not exactly two bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BetweenPolicy {
    /// Drop the field from the statement
    #[default]
    Skip,
    /// Fail the build with `BetweenArity`
    Reject,
}

/// Compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Field order within an operator group (default: ascending)
    #[serde(default)]
    pub field_order: FieldOrdering,

    /// Malformed between handling (default: skip)
    #[serde(default)]
    pub between_policy: BetweenPolicy,

    /// Maximum `_or` nesting depth (default: unbounded)
    #[serde(default)]
    pub max_or_depth: Option<usize>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            field_order: FieldOrdering::Ascending,
            between_policy: BetweenPolicy::Skip,
            max_or_depth: None,
        }
    }
}

impl CompilerConfig {
    /// Parses and validates a JSON config document
    pub fn from_json_str(content: &str) -> BuilderResult<Self> {
        let config: CompilerConfig = serde_json::from_str(content)
            .map_err(|e| BuilderError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates field combinations
    pub fn validate(&self) -> BuilderResult<()> {
        if self.max_or_depth == Some(0) {
            return Err(BuilderError::InvalidConfig(
                "max_or_depth must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
