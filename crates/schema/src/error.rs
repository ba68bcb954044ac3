//! Issue and error types for validation failures
//!
//! An [`Issue`] is one structured failure: where it happened (a
//! [`Path`] from the schema root), what kind of failure it is (an
//! [`IssueCode`]) and a human-readable message. A failed parse carries
//! every issue found, in depth-first order of detection.
//!
//! Messages use `Cow<'static, str>` so static defaults and custom
//! messages given as literals never allocate.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

// ============================================================================
// ISSUE CODE
// ============================================================================

/// Enumerated failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Value is not of the expected type, or a required field is missing.
    InvalidType,
    /// Length, size, number or date below the lower bound.
    TooSmall,
    /// Length, size, number or date above the upper bound.
    TooBig,
    /// String does not match a format (email, url, uuid, regex, affix).
    InvalidFormat,
    /// Raised by a refinement hook.
    Custom,
    /// Strict object received keys it does not declare.
    UnrecognizedKeys,
}

impl IssueCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::InvalidFormat => "invalid_format",
            Self::Custom => "custom",
            Self::UnrecognizedKeys => "unrecognized_keys",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PATH
// ============================================================================

/// One step from a container to a child value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object field name, or the display text of a map key.
    Key(String),
    /// Array or set position.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl PartialEq<&str> for PathSegment {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Self::Key(key) if key == other)
    }
}

impl PartialEq<usize> for PathSegment {
    fn eq(&self, other: &usize) -> bool {
        matches!(self, Self::Index(index) if index == other)
    }
}

/// Location of a value inside the input; most paths are shallow.
pub type Path = SmallVec<[PathSegment; 4]>;

/// Renders a path as `address.city` / `tags[1]`.
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

// ============================================================================
// ISSUE
// ============================================================================

/// A single validation failure.
///
/// # Examples
///
/// ```rust
/// use sieve_schema::{Issue, IssueCode};
///
/// let issue = Issue::too_small(3, "String must contain at least 3 character(s)")
///     .at("name");
/// assert_eq!(issue.code, IssueCode::TooSmall);
/// assert_eq!(issue.param("minimum"), Some("3"));
/// assert_eq!(issue.to_string(), "[name] too_small: String must contain at least 3 character(s)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Failure kind for programmatic handling.
    pub code: IssueCode,

    /// Path from the schema root to the failing value.
    pub path: Path,

    /// Human-readable message.
    pub message: Cow<'static, str>,

    /// Ordered details such as `expected` / `received` or `minimum`.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_params"
    )]
    pub params: Vec<(Cow<'static, str>, String)>,
}

#[allow(clippy::ptr_arg)]
fn serialize_params<S: Serializer>(
    params: &Vec<(Cow<'static, str>, String)>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(params.iter().map(|(k, v)| (k.as_ref(), v.as_str())))
}

impl Issue {
    /// Creates an issue at the root path.
    pub fn new(code: IssueCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            path: Path::new(),
            message: message.into(),
            params: Vec::new(),
        }
    }

    /// Appends a path segment.
    ///
    /// Issues are built relative to the value being checked; the parse
    /// context prefixes the path of that value when the issue is reported.
    #[must_use = "builder methods must be chained or built"]
    pub fn at(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.push(segment.into());
        self
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<Cow<'static, str>>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Replaces the message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path rendered as `address.city`.
    #[must_use]
    pub fn path_string(&self) -> String {
        format_path(&self.path)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.code, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.path_string(), self.code, self.message)
        }
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl Issue {
    /// Creates an "invalid_type" issue with the default message.
    pub fn invalid_type(expected: impl fmt::Display, received: impl fmt::Display) -> Self {
        Self::new(
            IssueCode::InvalidType,
            format!("Expected {expected}, received {received}"),
        )
        .with_param("expected", expected)
        .with_param("received", received)
    }

    /// Creates the issue for a missing required field.
    pub fn required(expected: impl fmt::Display) -> Self {
        Self::new(IssueCode::InvalidType, "Required")
            .with_param("expected", expected)
            .with_param("received", "undefined")
    }

    /// Creates a "too_small" issue.
    pub fn too_small(minimum: impl fmt::Display, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(IssueCode::TooSmall, message).with_param("minimum", minimum)
    }

    /// Creates a "too_big" issue.
    pub fn too_big(maximum: impl fmt::Display, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(IssueCode::TooBig, message).with_param("maximum", maximum)
    }

    /// Creates an "invalid_format" issue.
    pub fn invalid_format(
        format: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let format = format.into();
        Self::new(IssueCode::InvalidFormat, message).with_param("format", format)
    }

    /// Creates a "custom" issue.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(IssueCode::Custom, message)
    }

    /// Creates an "unrecognized_keys" issue.
    pub fn unrecognized_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let keys: Vec<String> = keys.into_iter().map(|k| format!("'{k}'")).collect();
        let joined = keys.join(", ");
        Self::new(
            IssueCode::UnrecognizedKeys,
            format!("Unrecognized key(s) in object: {joined}"),
        )
        .with_param("keys", joined)
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Error returned by [`Parse::parse`](crate::Parse::parse): the full issue
/// sequence of a failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl ValidationError {
    /// Wraps an issue sequence.
    #[must_use]
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// All issues in detection order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Groups messages by the first path segment.
    ///
    /// Issues with an empty path become form errors. Index segments are
    /// keyed by their decimal text.
    #[must_use]
    pub fn flatten(&self) -> FlattenedErrors {
        let mut flattened = FlattenedErrors::default();
        for issue in &self.issues {
            match issue.path.first() {
                None => flattened.form_errors.push(issue.message.to_string()),
                Some(segment) => {
                    let key = match segment {
                        PathSegment::Key(key) => key.clone(),
                        PathSegment::Index(index) => index.to_string(),
                    };
                    flattened
                        .field_errors
                        .entry(key)
                        .or_default()
                        .push(issue.message.to_string());
                }
            }
        }
        flattened
    }

    /// Serializes the issue list for programmatic consumers.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(&self.issues).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} issue(s):", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<Vec<Issue>> for ValidationError {
    fn from(issues: Vec<Issue>) -> Self {
        Self::new(issues)
    }
}

/// Messages grouped by top-level field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlattenedErrors {
    pub form_errors: Vec<String>,
    pub field_errors: IndexMap<String, Vec<String>>,
}

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// Failure to build a schema or load parse options.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid regex pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid parse options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

// ============================================================================
// TESTS
// ============================================================================
