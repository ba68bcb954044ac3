//! Array schema.

use std::borrow::Cow;

use sieve_value::{Value, ValueKind};

use super::SizeCheck;
use crate::context::ParseContext;
use crate::primitive::{Checks, report_invalid_type};
use crate::schema::{Parse, Schema};

/// Ordered sequence whose elements all match one schema.
///
/// # Examples
///
/// ```rust
/// use sieve_schema::{Parse, Value, array, string};
///
/// let tags = array(string().min(3)).min(1).max(10);
/// let result = tags.safe_parse(Value::array(["farhan", "ab"]));
/// assert_eq!(result.issues()[0].path_string(), "[1]");
/// ```
#[derive(Debug, Clone)]
pub struct ArraySchema {
    element: Box<Schema>,
    checks: Checks<SizeCheck>,
}

impl ArraySchema {
    pub fn new(element: impl Into<Schema>) -> Self {
        Self {
            element: Box::new(element.into()),
            checks: Checks::default(),
        }
    }

    pub fn element(&self) -> &Schema {
        &self.element
    }

    /// At least `min` elements.
    pub fn min(mut self, min: usize) -> Self {
        self.checks.push(SizeCheck::Min(min));
        self
    }

    /// At most `max` elements.
    pub fn max(mut self, max: usize) -> Self {
        self.checks.push(SizeCheck::Max(max));
        self
    }

    /// Exactly `len` elements.
    pub fn length(mut self, len: usize) -> Self {
        self.checks.push(SizeCheck::Exact(len));
        self
    }

    pub fn nonempty(self) -> Self {
        self.min(1)
    }

    /// Custom message for the most recently added check.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.checks.set_message(message.into());
        self
    }
}

impl Parse for ArraySchema {
    fn check(&self, input: Value, ctx: &mut ParseContext<'_>) -> Option<Value> {
        let Value::Array(items) = input else {
            report_invalid_type(ctx, "array", &input, self.checks.type_message());
            return None;
        };

        let mut valid = self
            .checks
            .run(&items.len(), ctx, |check, len| check.test("Array", *len));

        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            if ctx.should_stop() {
                return None;
            }
            ctx.push(index);
            match self.element.check(item, ctx) {
                Some(value) => output.push(value),
                None => valid = false,
            }
            ctx.pop();
        }

        valid.then_some(Value::Array(output))
    }

    fn expected_kind(&self) -> ValueKind {
        ValueKind::Array
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;
    use crate::{SchemaExt, number, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn valid_elements_pass_through() {
        let schema = ArraySchema::new(string()).min(1);
        let input = Value::array(["farhan", "ramadan"]);
        assert_eq!(schema.parse(input.clone()).unwrap(), input);
    }

    #[test]
    fn every_bad_element_is_reported_by_index() {
        let schema = ArraySchema::new(number().min(0.0));
        let result = schema.safe_parse(Value::array([Value::from(1), Value::from(-1), Value::from("x")]));
        let paths: Vec<_> = result.issues().iter().map(|i| i.path_string()).collect();
        assert_eq!(paths, vec!["[1]", "[2]"]);
    }

    #[test]
    fn size_checks_run_before_elements() {
        let schema = ArraySchema::new(number()).max(1);
        let result = schema.safe_parse(Value::array([Value::from(1), Value::from("x")]));
        let codes: Vec<_> = result.issues().iter().map(|i| i.code).collect();
        assert_eq!(codes, vec![IssueCode::TooBig, IssueCode::InvalidType]);
        assert_eq!(result.issues()[0].message, "Array must contain at most 1 element(s)");
    }

    #[test]
    fn wrong_container_is_one_issue() {
        let schema = ArraySchema::new(string()).min(2);
        let result = schema.safe_parse(Value::set(["a", "b"]));
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].message, "Expected array, received set");
    }

    #[test]
    fn element_transforms_reach_the_output() {
        let schema = ArraySchema::new(
            string().transform(|v| Value::from(v.as_str().unwrap_or_default().to_uppercase())),
        );
        assert_eq!(
            schema.parse(Value::array(["a", "b"])).unwrap(),
            Value::array(["A", "B"])
        );
    }

    #[test]
    fn nonempty_with_message() {
        let schema = ArraySchema::new(string()).nonempty().message("minimal satu hobi");
        assert_eq!(
            schema.safe_parse(Value::array(Vec::<Value>::new())).issues()[0].message,
            "minimal satu hobi"
        );
    }
}
