//! Traversal state for a single parse call.
//!
//! [`ParseContext`] tracks the path of the value currently being checked
//! and collects every issue reported below it. Refinement hooks get a
//! narrower [`RefinementCtx`] that can only add issues.

use std::borrow::Cow;

use crate::error::{Issue, Path, PathSegment};
use crate::options::ParseOptions;
use crate::result::ValidationResult;
use sieve_value::Value;

/// Fallback message when a hook rejects a value without saying why.
pub(crate) const DEFAULT_CUSTOM_MESSAGE: &str = "Invalid input";

// ============================================================================
// PARSE CONTEXT
// ============================================================================

/// Issue collector and path stack for one parse call.
///
/// Created fresh per call by [`Parse::safe_parse_with`](crate::Parse::safe_parse_with);
/// custom [`Parse`](crate::Parse) implementations receive it in `check`.
#[derive(Debug)]
pub struct ParseContext<'o> {
    options: &'o ParseOptions,
    path: Path,
    issues: Vec<Issue>,
}

impl<'o> ParseContext<'o> {
    #[must_use]
    pub fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            path: Path::new(),
            issues: Vec::new(),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        self.options
    }

    /// Enters a child value.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.path.push(segment.into());
    }

    /// Leaves the current child value.
    pub fn pop(&mut self) {
        self.path.pop();
    }

    /// Path of the value currently being checked.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Records an issue; its path is taken relative to the current value.
    pub fn report(&mut self, mut issue: Issue) {
        if !self.path.is_empty() {
            let mut path = self.path.clone();
            path.extend(issue.path.drain(..));
            issue.path = path;
        }
        self.issues.push(issue);
    }

    /// Moves the issues a refinement hook added into this context.
    pub(crate) fn absorb(&mut self, refinement: RefinementCtx) {
        for issue in refinement.issues {
            self.report(issue);
        }
    }

    /// True once `abort_early` is set and an issue has been reported.
    pub fn should_stop(&self) -> bool {
        self.options.abort_early && !self.issues.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Builds the result for the root value.
    pub(crate) fn finish(self, output: Option<Value>) -> ValidationResult {
        match output {
            Some(value) if self.issues.is_empty() => ValidationResult::Success(value),
            _ if self.issues.is_empty() => {
                ValidationResult::Failure(vec![Issue::custom(DEFAULT_CUSTOM_MESSAGE)])
            }
            _ => ValidationResult::Failure(self.issues),
        }
    }
}

// ============================================================================
// REFINEMENT CONTEXT
// ============================================================================

/// Marker returned by a transform hook to declare its input invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("value rejected by refinement")]
pub struct Rejected;

/// Issue sink handed to refinement and transform hooks.
///
/// Issues are relative to the value the hook received; use
/// [`Issue::at`] to point below it.
///
/// # Examples
///
/// ```rust
/// use sieve_schema::{RefinementCtx, Rejected, Value};
///
/// fn must_upper_case(data: Value, ctx: &mut RefinementCtx) -> Result<Value, Rejected> {
///     match data.as_str() {
///         Some(s) if s == s.to_uppercase() => Ok(data),
///         _ => Err(ctx.reject("username harus uppercase")),
///     }
/// }
///
/// let mut ctx = RefinementCtx::new();
/// assert!(must_upper_case(Value::from("farhan"), &mut ctx).is_err());
/// assert_eq!(ctx.issues().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RefinementCtx {
    issues: Vec<Issue>,
}

impl RefinementCtx {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Adds a `custom` issue with the given message.
    pub fn custom(&mut self, message: impl Into<Cow<'static, str>>) {
        self.add_issue(Issue::custom(message));
    }

    /// Adds a `custom` issue and returns the rejection marker.
    pub fn reject(&mut self, message: impl Into<Cow<'static, str>>) -> Rejected {
        self.custom(message);
        Rejected
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn report_prefixes_current_path() {
        let options = ParseOptions::default();
        let mut ctx = ParseContext::new(&options);
        ctx.push("address");
        ctx.push("city");
        ctx.report(Issue::too_small(2, "too short"));
        ctx.pop();
        ctx.report(Issue::custom("bad").at("zip"));
        ctx.pop();

        let ValidationResult::Failure(issues) = ctx.finish(None) else {
            panic!("expected failure");
        };
        assert_eq!(issues[0].path_string(), "address.city");
        assert_eq!(issues[1].path_string(), "address.zip");
    }

    #[test]
    fn finish_without_issues_succeeds() {
        let options = ParseOptions::default();
        let ctx = ParseContext::new(&options);
        assert_eq!(
            ctx.finish(Some(Value::from(1))),
            ValidationResult::Success(Value::from(1))
        );
    }

    #[test]
    fn finish_without_output_or_issues_is_a_failure() {
        let options = ParseOptions::default();
        let ctx = ParseContext::new(&options);
        let result = ctx.finish(None);
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].code, IssueCode::Custom);
    }

    #[test]
    fn should_stop_only_when_aborting_early() {
        let collect_all = ParseOptions::default();
        let mut ctx = ParseContext::new(&collect_all);
        ctx.report(Issue::custom("x"));
        assert!(!ctx.should_stop());

        let abort = ParseOptions::default().with_abort_early(true);
        let mut ctx = ParseContext::new(&abort);
        assert!(!ctx.should_stop());
        ctx.report(Issue::custom("x"));
        assert!(ctx.should_stop());
    }

    #[test]
    fn absorb_places_hook_issues_under_current_path() {
        let options = ParseOptions::default();
        let mut ctx = ParseContext::new(&options);
        ctx.push("username");

        let mut refinement = RefinementCtx::new();
        let _ = refinement.reject("username harus uppercase");
        ctx.absorb(refinement);

        assert_eq!(ctx.issue_count(), 1);
        assert_eq!(ctx.issues[0].path.as_slice(), &[PathSegment::from("username")]);
        assert_eq!(ctx.issues[0].message, "username harus uppercase");
    }
}
