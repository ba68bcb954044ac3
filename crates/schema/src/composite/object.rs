//! Object schema.

use std::borrow::Cow;

use indexmap::IndexMap;
use sieve_value::{Object, Value, ValueKind};

use crate::context::ParseContext;
use crate::error::Issue;
use crate::options::UnknownKeys;
use crate::primitive::report_invalid_type;
use crate::schema::{Parse, Schema, SchemaExt};

/// Named fields, each checked against its own schema.
///
/// Fields are checked in declaration order and every field is attempted,
/// so one parse reports the issues of all fields. Output keys follow the
/// declaration order.
///
/// # Examples
///
/// ```rust
/// use sieve_schema::{IssueCode, Parse, Value, object, string};
///
/// let user = object()
///     .field("name", string().min(3))
///     .field("email", string().email());
///
/// let input = Value::object([("name", "farhan"), ("email", "not-an-email")]);
/// let result = user.safe_parse(input);
/// assert_eq!(result.issues().len(), 1);
/// assert_eq!(result.issues()[0].code, IssueCode::InvalidFormat);
/// assert_eq!(result.issues()[0].path_string(), "email");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: IndexMap<String, Schema>,
    unknown_keys: Option<UnknownKeys>,
    type_message: Option<Cow<'static, str>>,
}

impl ObjectSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field; declaring a name again replaces its schema.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.insert(name.into(), schema.into());
        self
    }

    /// Reports undeclared keys as `unrecognized_keys`.
    pub fn strict(self) -> Self {
        self.unknown_keys(UnknownKeys::Strict)
    }

    /// Copies undeclared keys into the output.
    pub fn passthrough(self) -> Self {
        self.unknown_keys(UnknownKeys::Passthrough)
    }

    /// Drops undeclared keys from the output.
    pub fn strip(self) -> Self {
        self.unknown_keys(UnknownKeys::Strip)
    }

    /// Sets the undeclared key policy, overriding [`ParseOptions`](crate::ParseOptions).
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = Some(policy);
        self
    }

    /// Makes every declared field optional.
    pub fn partial(mut self) -> Self {
        self.fields = self
            .fields
            .into_iter()
            .map(|(name, schema)| (name, schema.optional()))
            .collect();
        self
    }

    /// Adds the fields of `other`, replacing fields with the same name.
    /// The unknown key policy of `self` is kept.
    pub fn extend(mut self, other: ObjectSchema) -> Self {
        self.fields.extend(other.fields);
        self
    }

    /// Replaces the `invalid_type` message.
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.type_message = Some(message.into());
        self
    }

    /// Declared fields in order.
    pub fn shape(&self) -> &IndexMap<String, Schema> {
        &self.fields
    }
}

impl Parse for ObjectSchema {
    fn check(&self, input: Value, ctx: &mut ParseContext<'_>) -> Option<Value> {
        let Value::Object(mut input) = input else {
            report_invalid_type(ctx, "object", &input, self.type_message.as_ref());
            return None;
        };

        let mut valid = true;
        let mut output = Object::with_capacity(self.fields.len());

        for (name, schema) in &self.fields {
            if ctx.should_stop() {
                return None;
            }

            let value = match input.shift_remove(name) {
                Some(value) => value,
                None => match schema.default_value() {
                    Some(default) => default.clone(),
                    None if schema.is_optional() => continue,
                    None => {
                        ctx.report(Issue::required(schema.expected_kind()).at(name.as_str()));
                        valid = false;
                        continue;
                    }
                },
            };

            ctx.push(name.as_str());
            let checked = schema.check(value, ctx);
            ctx.pop();

            match checked {
                Some(value) => {
                    output.insert(name.clone(), value);
                }
                None => valid = false,
            }
        }

        if ctx.should_stop() {
            return None;
        }

        // `input` now holds only undeclared keys.
        if !input.is_empty() {
            match self.unknown_keys.unwrap_or(ctx.options().unknown_keys) {
                UnknownKeys::Strip => {}
                UnknownKeys::Passthrough => output.extend(input),
                UnknownKeys::Strict => {
                    ctx.report(Issue::unrecognized_keys(input.keys().map(String::as_str)));
                    valid = false;
                }
            }
        }

        valid.then_some(Value::Object(output))
    }

    fn expected_kind(&self) -> ValueKind {
        ValueKind::Object
    }
}
