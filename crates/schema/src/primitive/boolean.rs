//! Boolean schema.

use std::borrow::Cow;

use sieve_value::{Value, ValueKind};

use super::{Checks, report_invalid_type};
use crate::coerce::coerce;
use crate::context::ParseContext;
use crate::schema::Parse;

/// Accepts `true` and `false`.
#[derive(Debug, Clone, Default)]
pub struct BooleanSchema {
    checks: Checks<()>,
    coerce: bool,
}

impl BooleanSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `"true"` / `"false"` strings and numbers.
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Replaces the `invalid_type` message.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.checks.set_message(message.into());
        self
    }
}

impl Parse for BooleanSchema {
    fn check(&self, input: Value, ctx: &mut ParseContext<'_>) -> Option<Value> {
        let input = if self.coerce {
            coerce(ValueKind::Boolean, input)
        } else {
            input
        };

        match input {
            Value::Bool(_) => Some(input),
            other => {
                report_invalid_type(ctx, "boolean", &other, self.checks.type_message());
                None
            }
        }
    }

    fn expected_kind(&self) -> ValueKind {
        ValueKind::Boolean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;

    #[test]
    fn accepts_only_booleans() {
        let schema = BooleanSchema::new();
        assert!(schema.safe_parse(true).is_success());

        let result = schema.safe_parse("true");
        assert_eq!(result.issues()[0].code, IssueCode::InvalidType);
        assert_eq!(result.issues()[0].message, "Expected boolean, received string");
    }

    #[test]
    fn coerced() {
        let schema = BooleanSchema::new().coerce();
        assert_eq!(schema.parse("true").unwrap(), Value::Bool(true));
        assert_eq!(schema.parse(0).unwrap(), Value::Bool(false));
        assert!(schema.safe_parse("yes").is_failure());
    }

    #[test]
    fn custom_type_message() {
        let schema = BooleanSchema::new().message("harus boolean");
        assert_eq!(schema.safe_parse(1).issues()[0].message, "harus boolean");
    }
}
