//! Post-validation stages: transforms and refinements.
//!
//! Stages run in declaration order on the output of the base node. The
//! first stage that reports an issue stops the chain for that node.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use sieve_value::Value;

use crate::context::{DEFAULT_CUSTOM_MESSAGE, ParseContext, RefinementCtx, Rejected};
use crate::error::Issue;

pub(crate) type TransformFn = dyn Fn(Value) -> Value + Send + Sync;
pub(crate) type TransformWithFn =
    dyn Fn(Value, &mut RefinementCtx) -> Result<Value, Rejected> + Send + Sync;
pub(crate) type PredicateFn = dyn Fn(&Value) -> bool + Send + Sync;
pub(crate) type SuperRefineFn = dyn Fn(&Value, &mut RefinementCtx) + Send + Sync;

/// One stage of a node's effect chain.
#[derive(Clone)]
pub(crate) enum Effect {
    Transform(Arc<TransformFn>),
    TransformWith(Arc<TransformWithFn>),
    Refine {
        predicate: Arc<PredicateFn>,
        message: Cow<'static, str>,
    },
    SuperRefine(Arc<SuperRefineFn>),
}

impl Effect {
    fn name(&self) -> &'static str {
        match self {
            Self::Transform(_) => "transform",
            Self::TransformWith(_) => "transform_with",
            Self::Refine { .. } => "refine",
            Self::SuperRefine(_) => "super_refine",
        }
    }

    /// Runs this stage; `Err` carries the issues that rejected the value.
    fn run(&self, value: Value) -> Result<Value, RefinementCtx> {
        let mut hook = RefinementCtx::new();
        match self {
            Self::Transform(f) => return Ok(f(value)),
            Self::TransformWith(f) => match f(value, &mut hook) {
                Ok(output) if !hook.has_issues() => return Ok(output),
                Ok(_) => {}
                Err(Rejected) => {
                    if !hook.has_issues() {
                        hook.custom(DEFAULT_CUSTOM_MESSAGE);
                    }
                }
            },
            Self::Refine { predicate, message } => {
                if predicate(&value) {
                    return Ok(value);
                }
                hook.add_issue(Issue::custom(message.clone()));
            }
            Self::SuperRefine(f) => {
                f(&value, &mut hook);
                if !hook.has_issues() {
                    return Ok(value);
                }
            }
        }
        Err(hook)
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refine { message, .. } => f
                .debug_struct("Refine")
                .field("message", message)
                .finish_non_exhaustive(),
            other => f.write_str(other.name()),
        }
    }
}

/// Runs the chain, reporting the issues of the first rejecting stage.
pub(crate) fn apply(effects: &[Effect], value: Value, ctx: &mut ParseContext<'_>) -> Option<Value> {
    let mut value = value;
    for effect in effects {
        match effect.run(value) {
            Ok(output) => value = output,
            Err(rejection) => {
                tracing::trace!(
                    stage = effect.name(),
                    issues = rejection.issues().len(),
                    path = %crate::error::format_path(ctx.path()),
                    "effect rejected value"
                );
                ctx.absorb(rejection);
                return None;
            }
        }
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;
    use crate::options::ParseOptions;
    use pretty_assertions::assert_eq;

    fn run(effects: &[Effect], input: Value) -> (Option<Value>, Vec<Issue>) {
        let options = ParseOptions::default();
        let mut ctx = ParseContext::new(&options);
        ctx.push("field");
        let output = apply(effects, input, &mut ctx);
        ctx.pop();
        (output, ctx.finish(None).issues().to_vec())
    }

    fn upper() -> Effect {
        Effect::Transform(Arc::new(|v: Value| match v {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        }))
    }

    #[test]
    fn transforms_chain_in_order() {
        let trim = Effect::Transform(Arc::new(|v: Value| match v {
            Value::String(s) => Value::String(s.trim().to_owned()),
            other => other,
        }));
        let (output, _) = run(&[upper(), trim], Value::from("   farhan"));
        assert_eq!(output, Some(Value::from("FARHAN")));
    }

    #[test]
    fn failed_refine_stops_the_chain() {
        let never = Effect::Refine {
            predicate: Arc::new(|_: &Value| false),
            message: Cow::Borrowed("nope"),
        };
        let (output, issues) = run(&[never, upper()], Value::from("x"));
        assert_eq!(output, None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::Custom);
        assert_eq!(issues[0].path_string(), "field");
    }

    #[test]
    fn silent_rejection_gets_default_issue() {
        let reject = Effect::TransformWith(Arc::new(
            |_: Value, _: &mut RefinementCtx| -> Result<Value, Rejected> { Err(Rejected) },
        ));
        let (_, issues) = run(&[reject], Value::Null);
        assert_eq!(issues[0].message, "Invalid input");
    }

    #[test]
    fn issues_without_rejection_still_fail() {
        let sneaky = Effect::TransformWith(Arc::new(
            |v: Value, ctx: &mut RefinementCtx| -> Result<Value, Rejected> {
                ctx.custom("flagged");
                Ok(v)
            },
        ));
        let (output, issues) = run(&[sneaky], Value::from(1));
        assert_eq!(output, None);
        assert_eq!(issues[0].message, "flagged");
    }

    #[test]
    fn super_refine_issues_keep_relative_path() {
        let nested = Effect::SuperRefine(Arc::new(|_: &Value, ctx: &mut RefinementCtx| {
            ctx.add_issue(Issue::custom("bad city").at("city"));
        }));
        let (_, issues) = run(&[nested], Value::Null);
        assert_eq!(issues[0].path_string(), "field.city");
    }
}
