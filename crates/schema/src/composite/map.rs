//! Map schema.

use std::borrow::Cow;

use sieve_value::{Value, ValueKind, ValueMap};

use crate::context::ParseContext;
use crate::error::PathSegment;
use crate::primitive::report_invalid_type;
use crate::schema::{Parse, Schema};

/// Keyed collection; keys and values are checked against their own
/// schemas.
///
/// Issues for an entry, whether from its key or its value, are placed
/// under a path segment holding the key's display text.
///
/// Output entries are collected into a new map. Entries whose keys become
/// equal after coercion or a transform collapse into one, and the later
/// entry's value wins.
///
/// # Examples
///
/// ```rust
/// use sieve_schema::{Parse, Value, map, number, string};
///
/// let scores = map(string(), number().min(0.0));
/// let result = scores.safe_parse(Value::map([("farhan", 90), ("ramadan", -1)]));
/// assert_eq!(result.issues()[0].path_string(), "ramadan");
/// ```
#[derive(Debug, Clone)]
pub struct MapSchema {
    key: Box<Schema>,
    value: Box<Schema>,
    type_message: Option<Cow<'static, str>>,
}

impl MapSchema {
    pub fn new(key: impl Into<Schema>, value: impl Into<Schema>) -> Self {
        Self {
            key: Box::new(key.into()),
            value: Box::new(value.into()),
            type_message: None,
        }
    }

    pub fn key(&self) -> &Schema {
        &self.key
    }

    pub fn value(&self) -> &Schema {
        &self.value
    }

    /// Replaces the `invalid_type` message.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.type_message = Some(message.into());
        self
    }
}

impl Parse for MapSchema {
    fn check(&self, input: Value, ctx: &mut ParseContext<'_>) -> Option<Value> {
        let Value::Map(entries) = input else {
            report_invalid_type(ctx, "map", &input, self.type_message.as_ref());
            return None;
        };

        let mut valid = true;
        let mut output = ValueMap::new();
        for (key, value) in entries {
            if ctx.should_stop() {
                return None;
            }
            ctx.push(PathSegment::Key(key.to_string()));
            let key = self.key.check(key, ctx);
            if ctx.should_stop() {
                ctx.pop();
                return None;
            }
            let value = self.value.check(value, ctx);
            ctx.pop();

            match (key, value) {
                (Some(key), Some(value)) => {
                    output.insert(key, value);
                }
                _ => valid = false,
            }
        }

        valid.then_some(Value::Map(output))
    }

    fn expected_kind(&self) -> ValueKind {
        ValueKind::Map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;
    use crate::options::ParseOptions;
    use crate::{coerce, number, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn valid_map_passes() {
        let schema = MapSchema::new(string(), string().email());
        let input = Value::map([("farhan", "farhan@example.com")]);
        assert_eq!(schema.parse(input.clone()).unwrap(), input);
    }

    #[test]
    fn key_and_value_are_both_checked() {
        let schema = MapSchema::new(string().min(3), number());
        let result = schema.safe_parse(Value::map([("ab", "x")]));
        let codes: Vec<_> = result.issues().iter().map(|i| i.code).collect();
        assert_eq!(codes, vec![IssueCode::TooSmall, IssueCode::InvalidType]);
        assert!(result.issues().iter().all(|i| i.path_string() == "ab"));
    }

    #[test]
    fn keys_may_be_coerced() {
        let schema = MapSchema::new(coerce::number(), string());
        let output = schema.parse(Value::map([("1", "one")])).unwrap();
        assert_eq!(output, Value::map([(1, "one")]));
    }

    #[test]
    fn keys_equal_after_coercion_collapse() {
        let schema = MapSchema::new(coerce::number(), string());
        let output = schema.parse(Value::map([("1", "one"), ("1.0", "uno")])).unwrap();
        assert_eq!(output, Value::map([(1, "uno")]));
    }

    #[test]
    fn abort_early_skips_value_after_bad_key() {
        let options = ParseOptions::default().with_abort_early(true);
        let schema = MapSchema::new(string().min(3), number());
        let result = schema.safe_parse_with(Value::map([("ab", "x")]), &options);
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].code, IssueCode::TooSmall);
        assert_eq!(result.issues()[0].path_string(), "ab");
    }

    #[test]
    fn objects_are_not_maps() {
        let schema = MapSchema::new(string(), string());
        let result = schema.safe_parse(Value::object([("a", "b")]));
        assert_eq!(result.issues()[0].message, "Expected map, received object");
    }
}
