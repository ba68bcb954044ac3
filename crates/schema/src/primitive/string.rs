//! String schema.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use sieve_value::{Value, ValueKind};

use super::{Checks, report_invalid_type};
use crate::coerce::coerce;
use crate::context::ParseContext;
use crate::error::{Issue, SchemaError};
use crate::schema::Parse;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

#[derive(Debug, Clone)]
pub(crate) enum StringCheck {
    Min(usize),
    Max(usize),
    Length(usize),
    Email,
    Url,
    Uuid,
    Regex(Regex),
    StartsWith(String),
    EndsWith(String),
}

impl StringCheck {
    fn test(&self, input: &str) -> Option<Issue> {
        // Length is counted in Unicode scalar values.
        let len = || input.chars().count();
        match self {
            Self::Min(min) => (len() < *min).then(|| {
                Issue::too_small(min, format!("String must contain at least {min} character(s)"))
            }),
            Self::Max(max) => (len() > *max).then(|| {
                Issue::too_big(max, format!("String must contain at most {max} character(s)"))
            }),
            Self::Length(exact) => {
                let actual = len();
                let message = format!("String must contain exactly {exact} character(s)");
                if actual < *exact {
                    Some(Issue::too_small(exact, message))
                } else if actual > *exact {
                    Some(Issue::too_big(exact, message))
                } else {
                    None
                }
            }
            Self::Email => (!EMAIL_REGEX.is_match(input))
                .then(|| Issue::invalid_format("email", "Invalid email")),
            Self::Url => {
                (!URL_REGEX.is_match(input)).then(|| Issue::invalid_format("url", "Invalid url"))
            }
            Self::Uuid => (!UUID_REGEX.is_match(input))
                .then(|| Issue::invalid_format("uuid", "Invalid uuid")),
            Self::Regex(pattern) => (!pattern.is_match(input)).then(|| {
                Issue::invalid_format("regex", "Invalid").with_param("pattern", pattern.as_str())
            }),
            Self::StartsWith(prefix) => (!input.starts_with(prefix.as_str())).then(|| {
                Issue::invalid_format(
                    "starts_with",
                    format!("Invalid input: must start with \"{prefix}\""),
                )
            }),
            Self::EndsWith(suffix) => (!input.ends_with(suffix.as_str())).then(|| {
                Issue::invalid_format(
                    "ends_with",
                    format!("Invalid input: must end with \"{suffix}\""),
                )
            }),
        }
    }
}

/// Rewrites applied to the string before any check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringOp {
    Trim,
    ToLowercase,
    ToUppercase,
}

impl StringOp {
    fn apply(self, input: String) -> String {
        match self {
            Self::Trim => input.trim().to_owned(),
            Self::ToLowercase => input.to_lowercase(),
            Self::ToUppercase => input.to_uppercase(),
        }
    }
}

/// Validates text.
///
/// # Examples
///
/// ```rust
/// use sieve_schema::{Parse, Value, string};
///
/// let name = string().min(3).max(10);
/// assert_eq!(name.parse("farhan").unwrap(), Value::from("farhan"));
/// assert!(name.parse("fa").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    checks: Checks<StringCheck>,
    ops: Vec<StringOp>,
    coerce: bool,
}

impl StringSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts scalars to their text form before checking.
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// At least `min` characters.
    pub fn min(mut self, min: usize) -> Self {
        self.checks.push(StringCheck::Min(min));
        self
    }

    /// At most `max` characters.
    pub fn max(mut self, max: usize) -> Self {
        self.checks.push(StringCheck::Max(max));
        self
    }

    /// Exactly `len` characters.
    pub fn length(mut self, len: usize) -> Self {
        self.checks.push(StringCheck::Length(len));
        self
    }

    /// Shorthand for `min(1)`.
    pub fn nonempty(self) -> Self {
        self.min(1)
    }

    pub fn email(mut self) -> Self {
        self.checks.push(StringCheck::Email);
        self
    }

    /// `http` / `https` URL.
    pub fn url(mut self) -> Self {
        self.checks.push(StringCheck::Url);
        self
    }

    pub fn uuid(mut self) -> Self {
        self.checks.push(StringCheck::Uuid);
        self
    }

    /// Must match `pattern`.
    pub fn regex(self, pattern: &str) -> Result<Self, SchemaError> {
        let compiled = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(self.pattern(compiled))
    }

    /// Must match an already compiled regex.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.checks.push(StringCheck::Regex(pattern));
        self
    }

    pub fn starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.checks.push(StringCheck::StartsWith(prefix.into()));
        self
    }

    pub fn ends_with(mut self, suffix: impl Into<String>) -> Self {
        self.checks.push(StringCheck::EndsWith(suffix.into()));
        self
    }

    /// Strips leading and trailing whitespace before checks run.
    pub fn trim(mut self) -> Self {
        self.ops.push(StringOp::Trim);
        self
    }

    pub fn to_lowercase(mut self) -> Self {
        self.ops.push(StringOp::ToLowercase);
        self
    }

    pub fn to_uppercase(mut self) -> Self {
        self.ops.push(StringOp::ToUppercase);
        self
    }

    /// Custom message for the most recently added check.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.checks.set_message(message.into());
        self
    }
}

impl Parse for StringSchema {
    fn check(&self, input: Value, ctx: &mut ParseContext<'_>) -> Option<Value> {
        let input = if self.coerce {
            coerce(ValueKind::String, input)
        } else {
            input
        };

        let Value::String(mut text) = input else {
            report_invalid_type(ctx, "string", &input, self.checks.type_message());
            return None;
        };

        for op in &self.ops {
            text = op.apply(text);
        }

        let valid = self
            .checks
            .run(text.as_str(), ctx, |check, input| check.test(input));
        valid.then_some(Value::String(text))
    }

    fn expected_kind(&self) -> ValueKind {
        ValueKind::String
    }
}
