//! Outcome of a validation call.

use sieve_value::Value;

use crate::error::{Issue, ValidationError};

/// Tagged outcome of [`Parse::safe_parse`](crate::Parse::safe_parse).
///
/// `Failure` always holds at least one issue, in the order they were
/// detected (depth-first over the schema tree).
#[derive(Debug, Clone, PartialEq)]
#[must_use = "validation result must be checked"]
pub enum ValidationResult {
    /// Output value, after coercion and transforms.
    Success(Value),
    /// Every issue found.
    Failure(Vec<Issue>),
}

impl ValidationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Output value on success.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Issues on failure; empty on success.
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(issues) => issues,
        }
    }

    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(issues) => Err(ValidationError::new(issues)),
        }
    }
}

impl From<ValidationResult> for Result<Value, ValidationError> {
    fn from(result: ValidationResult) -> Self {
        result.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_accessors() {
        let result = ValidationResult::Success(Value::from("farhan"));
        assert!(result.is_success());
        assert_eq!(result.value(), Some(&Value::from("farhan")));
        assert!(result.issues().is_empty());
        assert_eq!(result.into_result().unwrap(), Value::from("farhan"));
    }

    #[test]
    fn failure_converts_to_error() {
        let result = ValidationResult::Failure(vec![Issue::custom("nope")]);
        assert!(result.is_failure());
        assert_eq!(result.value(), None);

        let err: Result<Value, ValidationError> = result.into();
        assert_eq!(err.unwrap_err().len(), 1);
    }
}
