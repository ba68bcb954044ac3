//! Per-call parse configuration.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// What an object does with input keys it does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Ignore them and leave them out of the output.
    #[default]
    Strip,
    /// Ignore them and copy them into the output unchanged.
    Passthrough,
    /// Report one `unrecognized_keys` issue listing them.
    Strict,
}

/// Options for a single parse call.
///
/// Every field has a default, so a partial document is enough:
///
/// ```rust
/// use sieve_schema::{ParseOptions, UnknownKeys};
///
/// let options = ParseOptions::from_json(r#"{ "unknown_keys": "strict" }"#).unwrap();
/// assert_eq!(options.unknown_keys, UnknownKeys::Strict);
/// assert!(!options.abort_early);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    /// Policy for objects that did not choose one with `.strict()`,
    /// `.passthrough()` or `.strip()`.
    pub unknown_keys: UnknownKeys,

    /// Stop traversal at the first issue instead of collecting all of them.
    pub abort_early: bool,
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }
}
