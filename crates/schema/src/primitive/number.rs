//! Number schema.

use std::borrow::Cow;

use sieve_value::{Value, ValueKind};

use super::{Checks, display_number, report_invalid_type};
use crate::coerce::coerce;
use crate::context::ParseContext;
use crate::error::Issue;
use crate::schema::Parse;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NumberCheck {
    Min(f64),
    Max(f64),
    Gt(f64),
    Lt(f64),
    Int,
}

impl NumberCheck {
    fn test(self, n: f64) -> Option<Issue> {
        match self {
            Self::Min(min) => (n < min).then(|| {
                let min = display_number(min);
                Issue::too_small(&min, format!("Number must be greater than or equal to {min}"))
                    .with_param("inclusive", true)
            }),
            Self::Max(max) => (n > max).then(|| {
                let max = display_number(max);
                Issue::too_big(&max, format!("Number must be less than or equal to {max}"))
                    .with_param("inclusive", true)
            }),
            Self::Gt(bound) => (n <= bound).then(|| {
                let bound = display_number(bound);
                Issue::too_small(&bound, format!("Number must be greater than {bound}"))
                    .with_param("inclusive", false)
            }),
            Self::Lt(bound) => (n >= bound).then(|| {
                let bound = display_number(bound);
                Issue::too_big(&bound, format!("Number must be less than {bound}"))
                    .with_param("inclusive", false)
            }),
            Self::Int => (n.fract() != 0.0 || !n.is_finite())
                .then(|| Issue::invalid_type("integer", "float")),
        }
    }
}

/// Validates finite or infinite numbers; NaN is rejected as `invalid_type`.
///
/// # Examples
///
/// ```rust
/// use sieve_schema::{Parse, number};
///
/// let age = number().int().nonnegative();
/// assert!(age.safe_parse(30).is_success());
/// assert_eq!(age.safe_parse(-1.5).issues().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    checks: Checks<NumberCheck>,
    coerce: bool,
}

impl NumberSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses numeric strings and maps booleans to 0/1 before checking.
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Greater than or equal to `min`.
    pub fn min(mut self, min: f64) -> Self {
        self.checks.push(NumberCheck::Min(min));
        self
    }

    /// Less than or equal to `max`.
    pub fn max(mut self, max: f64) -> Self {
        self.checks.push(NumberCheck::Max(max));
        self
    }

    /// Strictly greater than `bound`.
    pub fn gt(mut self, bound: f64) -> Self {
        self.checks.push(NumberCheck::Gt(bound));
        self
    }

    /// Strictly less than `bound`.
    pub fn lt(mut self, bound: f64) -> Self {
        self.checks.push(NumberCheck::Lt(bound));
        self
    }

    /// No fractional part.
    pub fn int(mut self) -> Self {
        self.checks.push(NumberCheck::Int);
        self
    }

    pub fn positive(self) -> Self {
        self.gt(0.0)
    }

    pub fn nonnegative(self) -> Self {
        self.min(0.0)
    }

    pub fn negative(self) -> Self {
        self.lt(0.0)
    }

    /// Custom message for the most recently added check.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.checks.set_message(message.into());
        self
    }
}

impl Parse for NumberSchema {
    fn check(&self, input: Value, ctx: &mut ParseContext<'_>) -> Option<Value> {
        let input = if self.coerce {
            coerce(ValueKind::Number, input)
        } else {
            input
        };

        let n = match input {
            Value::Number(n) if !n.is_nan() => n,
            other => {
                report_invalid_type(ctx, "number", &other, self.checks.type_message());
                return None;
            }
        };

        let valid = self.checks.run(&n, ctx, |check, n| check.test(*n));
        valid.then_some(Value::Number(n))
    }

    fn expected_kind(&self) -> ValueKind {
        ValueKind::Number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn nan_is_invalid_type() {
        let result = NumberSchema::new().safe_parse(f64::NAN);
        assert_eq!(result.issues()[0].code, IssueCode::InvalidType);
        assert_eq!(result.issues()[0].message, "Expected number, received nan");
    }

    #[test]
    fn infinity_passes_without_bounds() {
        assert!(NumberSchema::new().safe_parse(f64::INFINITY).is_success());
    }

    #[rstest]
    #[case(500.0, IssueCode::TooSmall, "Number must be greater than or equal to 1000")]
    #[case(2_000_000.0, IssueCode::TooBig, "Number must be less than or equal to 1000000")]
    fn range(#[case] input: f64, #[case] code: IssueCode, #[case] message: &str) {
        let schema = NumberSchema::new().min(1000.0).max(1_000_000.0);
        let result = schema.safe_parse(input);
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].code, code);
        assert_eq!(result.issues()[0].message, message);
        assert_eq!(result.issues()[0].param("inclusive"), Some("true"));
    }

    #[test]
    fn bounds_are_inclusive() {
        let schema = NumberSchema::new().min(1.0).max(2.0);
        assert!(schema.safe_parse(1).is_success());
        assert!(schema.safe_parse(2).is_success());
    }

    #[rstest]
    #[case(0.0, false)]
    #[case(0.1, true)]
    #[case(-1.0, false)]
    fn positive(#[case] input: f64, #[case] ok: bool) {
        assert_eq!(NumberSchema::new().positive().safe_parse(input).is_success(), ok);
    }

    #[test]
    fn negative_and_nonnegative() {
        assert!(NumberSchema::new().negative().safe_parse(-0.5).is_success());
        assert!(NumberSchema::new().negative().safe_parse(0).is_failure());
        assert!(NumberSchema::new().nonnegative().safe_parse(0).is_success());
        let result = NumberSchema::new().lt(5.0).safe_parse(5);
        assert_eq!(result.issues()[0].message, "Number must be less than 5");
    }

    #[test]
    fn int_reports_float() {
        let result = NumberSchema::new().int().safe_parse(1.5);
        assert_eq!(result.issues()[0].code, IssueCode::InvalidType);
        assert_eq!(result.issues()[0].message, "Expected integer, received float");
        assert!(NumberSchema::new().int().safe_parse(3).is_success());
    }

    #[test]
    fn coerces_numeric_strings() {
        let schema = NumberSchema::new().coerce().min(1000.0);
        assert_eq!(schema.parse("10000").unwrap(), Value::from(10_000));
        assert_eq!(
            schema.safe_parse("abc").issues()[0].message,
            "Expected number, received string"
        );
    }

    #[rstest]
    #[case("inf")]
    #[case("NaN")]
    fn non_finite_spellings_stay_strings(#[case] input: &str) {
        let result = NumberSchema::new().coerce().safe_parse(input);
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].message, "Expected number, received string");
    }

    #[test]
    fn custom_message_on_bound() {
        let schema = NumberSchema::new().min(18.0).message("terlalu muda");
        assert_eq!(schema.safe_parse(10).issues()[0].message, "terlalu muda");
    }
}
