//! Primitive validators: string, number, boolean and date.
//!
//! Each builder holds an ordered list of checks. Checking a value runs
//! the type check first; a type mismatch reports a single
//! `invalid_type` issue and skips the remaining checks. Otherwise every
//! check runs and every violation is reported, in declaration order.

mod boolean;
mod date;
mod number;
mod string;

use std::borrow::Cow;

use crate::context::ParseContext;
use crate::error::Issue;
use sieve_value::Value;

pub use boolean::BooleanSchema;
pub use date::DateSchema;
pub use number::NumberSchema;
pub use string::StringSchema;

// ============================================================================
// CHECK LIST
// ============================================================================

/// One declared constraint with its optional custom message.
#[derive(Debug, Clone)]
pub(crate) struct Check<K> {
    kind: K,
    message: Option<Cow<'static, str>>,
}

impl<K> Check<K> {
    fn apply_message(&self, issue: Issue) -> Issue {
        match &self.message {
            Some(message) => issue.with_message(message.clone()),
            None => issue,
        }
    }
}

/// Ordered constraints of a builder.
///
/// A message set before any check is added replaces the `invalid_type`
/// message instead.
#[derive(Debug, Clone)]
pub(crate) struct Checks<K> {
    type_message: Option<Cow<'static, str>>,
    items: Vec<Check<K>>,
}

impl<K> Default for Checks<K> {
    fn default() -> Self {
        Self {
            type_message: None,
            items: Vec::new(),
        }
    }
}

impl<K> Checks<K> {
    pub(crate) fn push(&mut self, kind: K) {
        self.items.push(Check {
            kind,
            message: None,
        });
    }

    /// Attaches `message` to the most recently added check.
    pub(crate) fn set_message(&mut self, message: Cow<'static, str>) {
        match self.items.last_mut() {
            Some(check) => check.message = Some(message),
            None => self.type_message = Some(message),
        }
    }

    pub(crate) fn type_message(&self) -> Option<&Cow<'static, str>> {
        self.type_message.as_ref()
    }

    /// Runs every check against `value`, reporting each violation.
    ///
    /// `test` returns the default issue for a failed check. Returns
    /// whether all checks passed.
    pub(crate) fn run<T: ?Sized>(
        &self,
        value: &T,
        ctx: &mut ParseContext<'_>,
        test: impl Fn(&K, &T) -> Option<Issue>,
    ) -> bool {
        let mut valid = true;
        for check in &self.items {
            if ctx.should_stop() {
                break;
            }
            if let Some(issue) = test(&check.kind, value) {
                ctx.report(check.apply_message(issue));
                valid = false;
            }
        }
        valid
    }
}

/// Reports the `invalid_type` issue for a primitive node.
pub(crate) fn report_invalid_type(
    ctx: &mut ParseContext<'_>,
    expected: &'static str,
    received: &Value,
    message: Option<&Cow<'static, str>>,
) {
    let issue = Issue::invalid_type(expected, received.type_name());
    ctx.report(match message {
        Some(message) => issue.with_message(message.clone()),
        None => issue,
    });
}

/// Number as it appears in messages (`1000`, not `1000.0`).
pub(crate) fn display_number(n: f64) -> String {
    Value::Number(n).to_string()
}
