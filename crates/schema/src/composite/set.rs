//! Set schema.

use std::borrow::Cow;

use sieve_value::{Value, ValueKind, ValueSet};

use super::SizeCheck;
use crate::context::ParseContext;
use crate::primitive::{Checks, report_invalid_type};
use crate::schema::{Parse, Schema};

/// Collection of unique values whose members all match one schema.
///
/// Uniqueness is a property of [`ValueSet`] itself and is not checked
/// again. Members are addressed by their position in insertion order.
/// Output members are collected into a new set, so members that become
/// equal after a transform collapse into one.
#[derive(Debug, Clone)]
pub struct SetSchema {
    element: Box<Schema>,
    checks: Checks<SizeCheck>,
}

impl SetSchema {
    pub fn new(element: impl Into<Schema>) -> Self {
        Self {
            element: Box::new(element.into()),
            checks: Checks::default(),
        }
    }

    pub fn element(&self) -> &Schema {
        &self.element
    }

    pub fn min(mut self, min: usize) -> Self {
        self.checks.push(SizeCheck::Min(min));
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.checks.push(SizeCheck::Max(max));
        self
    }

    /// Exactly `size` members.
    pub fn size(mut self, size: usize) -> Self {
        self.checks.push(SizeCheck::Exact(size));
        self
    }

    pub fn nonempty(self) -> Self {
        self.min(1)
    }

    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.checks.set_message(message.into());
        self
    }
}

impl Parse for SetSchema {
    fn check(&self, input: Value, ctx: &mut ParseContext<'_>) -> Option<Value> {
        let Value::Set(members) = input else {
            report_invalid_type(ctx, "set", &input, self.checks.type_message());
            return None;
        };

        let mut valid = self
            .checks
            .run(&members.len(), ctx, |check, len| check.test("Set", *len));

        let mut output = ValueSet::new();
        for (index, member) in members.into_iter().enumerate() {
            if ctx.should_stop() {
                return None;
            }
            ctx.push(index);
            match self.element.check(member, ctx) {
                Some(value) => {
                    output.insert(value);
                }
                None => valid = false,
            }
            ctx.pop();
        }

        valid.then_some(Value::Set(output))
    }

    fn expected_kind(&self) -> ValueKind {
        ValueKind::Set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;
    use crate::{SchemaExt, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn members_are_checked() {
        let schema = SetSchema::new(string().email()).min(1);
        assert!(schema.safe_parse(Value::set(["farhan@example.com"])).is_success());

        let result = schema.safe_parse(Value::set(["farhan@example.com", "nope"]));
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].path_string(), "[1]");
        assert_eq!(result.issues()[0].code, IssueCode::InvalidFormat);
    }

    #[test]
    fn size_bounds() {
        let schema = SetSchema::new(string()).size(2);
        let result = schema.safe_parse(Value::set(["a"]));
        assert_eq!(result.issues()[0].message, "Set must contain exactly 2 element(s)");
    }

    #[test]
    fn nonempty_with_message() {
        let schema = SetSchema::new(string()).nonempty().message("minimal satu peran");
        let result = schema.safe_parse(Value::set(Vec::<Value>::new()));
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].message, "minimal satu peran");
    }

    #[test]
    fn arrays_are_not_sets() {
        let result = SetSchema::new(string()).safe_parse(Value::array(["a"]));
        assert_eq!(result.issues()[0].message, "Expected set, received array");
    }

    #[test]
    fn transformed_duplicates_collapse() {
        let schema = SetSchema::new(
            string().transform(|v| Value::from(v.as_str().unwrap_or_default().to_lowercase())),
        );
        let output = schema.parse(Value::set(["A", "a"])).unwrap();
        assert_eq!(output, Value::set(["a"]));
    }
}
