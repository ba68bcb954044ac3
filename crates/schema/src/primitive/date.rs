//! Date schema.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use sieve_value::{Value, ValueKind};

use super::{Checks, report_invalid_type};
use crate::coerce::coerce;
use crate::context::ParseContext;
use crate::error::Issue;
use crate::schema::Parse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateCheck {
    Min(DateTime<Utc>),
    Max(DateTime<Utc>),
}

impl DateCheck {
    fn test(self, date: DateTime<Utc>) -> Option<Issue> {
        match self {
            Self::Min(min) => (date < min).then(|| {
                let min = Value::Date(min);
                Issue::too_small(&min, format!("Date must be greater than or equal to {min}"))
            }),
            Self::Max(max) => (date > max).then(|| {
                let max = Value::Date(max);
                Issue::too_big(&max, format!("Date must be smaller than or equal to {max}"))
            }),
        }
    }
}

/// Validates instants in time.
///
/// Without coercion only [`Value::Date`] is accepted; strings are not
/// parsed.
#[derive(Debug, Clone, Default)]
pub struct DateSchema {
    checks: Checks<DateCheck>,
    coerce: bool,
}

impl DateSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses ISO-8601 strings and millisecond timestamps before checking.
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Not before `min`.
    pub fn min(mut self, min: impl Into<DateTime<Utc>>) -> Self {
        self.checks.push(DateCheck::Min(min.into()));
        self
    }

    /// Not after `max`.
    pub fn max(mut self, max: impl Into<DateTime<Utc>>) -> Self {
        self.checks.push(DateCheck::Max(max.into()));
        self
    }

    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.checks.set_message(message.into());
        self
    }
}

impl Parse for DateSchema {
    fn check(&self, input: Value, ctx: &mut ParseContext<'_>) -> Option<Value> {
        let input = if self.coerce {
            coerce(ValueKind::Date, input)
        } else {
            input
        };

        let Value::Date(date) = input else {
            report_invalid_type(ctx, "date", &input, self.checks.type_message());
            return None;
        };

        let valid = self.checks.run(&date, ctx, |check, date| check.test(*date));
        valid.then_some(Value::Date(date))
    }

    fn expected_kind(&self) -> ValueKind {
        ValueKind::Date
    }
}
