//! Schema nodes and the parse entry points.
//!
//! Typed builders ([`StringSchema`], [`ObjectSchema`], ...) describe the
//! base check of a node. Converting one into a [`Schema`] adds the
//! modifiers every node shares: optionality, nullability, a default and
//! an effect chain. [`SchemaExt`] does that conversion implicitly, so a
//! builder chain reads left to right:
//!
//! ```rust
//! use sieve_schema::{Parse, SchemaExt, Value, string};
//!
//! let username = string()
//!     .transform(|v| Value::from(v.as_str().unwrap_or_default().trim().to_uppercase()));
//! assert_eq!(username.parse("   farhan").unwrap(), Value::from("FARHAN"));
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use sieve_value::{Value, ValueKind};

use crate::composite::{ArraySchema, MapSchema, ObjectSchema, SetSchema};
use crate::context::{ParseContext, RefinementCtx, Rejected};
use crate::effects::{self, Effect};
use crate::error::ValidationError;
use crate::options::ParseOptions;
use crate::primitive::{BooleanSchema, DateSchema, NumberSchema, StringSchema};
use crate::result::ValidationResult;

// ============================================================================
// PARSE TRAIT
// ============================================================================

/// A node that can check a value.
///
/// Implementors provide [`check`](Parse::check); the parse methods build
/// a fresh [`ParseContext`] per call, so a schema can be shared across
/// threads and reused indefinitely.
pub trait Parse {
    /// Checks `input` and returns the output value.
    ///
    /// Returns `None` when the value is rejected; the reasons are reported
    /// into `ctx` at the context's current path.
    fn check(&self, input: Value, ctx: &mut ParseContext<'_>) -> Option<Value>;

    /// Kind of value this node produces before effects run.
    fn expected_kind(&self) -> ValueKind;

    /// Validates `input` with explicit options.
    fn safe_parse_with(&self, input: impl Into<Value>, options: &ParseOptions) -> ValidationResult
    where
        Self: Sized,
    {
        let mut ctx = ParseContext::new(options);
        let output = self.check(input.into(), &mut ctx);
        let result = ctx.finish(output);
        tracing::debug!(
            kind = %self.expected_kind(),
            success = result.is_success(),
            issues = result.issues().len(),
            "parse finished"
        );
        result
    }

    /// Validates `input` with default options. Never fails; inspect the
    /// returned [`ValidationResult`].
    fn safe_parse(&self, input: impl Into<Value>) -> ValidationResult
    where
        Self: Sized,
    {
        self.safe_parse_with(input, &ParseOptions::default())
    }

    /// Validates `input`, returning the output or every issue as one error.
    fn parse(&self, input: impl Into<Value>) -> Result<Value, ValidationError>
    where
        Self: Sized,
    {
        self.safe_parse(input).into_result()
    }
}

// ============================================================================
// SCHEMA NODE
// ============================================================================

/// Base check of a schema node.
#[derive(Debug, Clone)]
pub enum SchemaKind {
    String(StringSchema),
    Number(NumberSchema),
    Boolean(BooleanSchema),
    Date(DateSchema),
    Object(ObjectSchema),
    Array(ArraySchema),
    Set(SetSchema),
    Map(MapSchema),
}

impl SchemaKind {
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Number(_) => ValueKind::Number,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Date(_) => ValueKind::Date,
            Self::Object(_) => ValueKind::Object,
            Self::Array(_) => ValueKind::Array,
            Self::Set(_) => ValueKind::Set,
            Self::Map(_) => ValueKind::Map,
        }
    }

    fn check(&self, input: Value, ctx: &mut ParseContext<'_>) -> Option<Value> {
        match self {
            Self::String(s) => s.check(input, ctx),
            Self::Number(s) => s.check(input, ctx),
            Self::Boolean(s) => s.check(input, ctx),
            Self::Date(s) => s.check(input, ctx),
            Self::Object(s) => s.check(input, ctx),
            Self::Array(s) => s.check(input, ctx),
            Self::Set(s) => s.check(input, ctx),
            Self::Map(s) => s.check(input, ctx),
        }
    }
}

/// A complete schema node: base check plus shared modifiers.
///
/// Immutable once built; `Clone` is cheap for the effect chain, which is
/// reference counted.
#[derive(Debug, Clone)]
pub struct Schema {
    kind: SchemaKind,
    optional: bool,
    nullable: bool,
    default: Option<Value>,
    effects: Vec<Effect>,
}

impl Schema {
    fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            optional: false,
            nullable: false,
            default: None,
            effects: Vec::new(),
        }
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Whether an object may omit this field.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Value substituted when an object omits this field.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

impl Parse for Schema {
    fn check(&self, input: Value, ctx: &mut ParseContext<'_>) -> Option<Value> {
        if self.nullable && input.is_null() {
            return Some(Value::Null);
        }
        let output = self.kind.check(input, ctx)?;
        effects::apply(&self.effects, output, ctx)
    }

    fn expected_kind(&self) -> ValueKind {
        self.kind.value_kind()
    }
}

macro_rules! into_schema {
    ($($builder:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$builder> for Schema {
                fn from(builder: $builder) -> Self {
                    Self::new(SchemaKind::$variant(builder))
                }
            }
        )*
    };
}

into_schema! {
    StringSchema => String,
    NumberSchema => Number,
    BooleanSchema => Boolean,
    DateSchema => Date,
    ObjectSchema => Object,
    ArraySchema => Array,
    SetSchema => Set,
    MapSchema => Map,
}

// ============================================================================
// MODIFIERS
// ============================================================================

/// Modifiers shared by every schema builder.
///
/// Each method converts the builder into a [`Schema`] and returns a new
/// node; effects accumulate in call order.
pub trait SchemaExt: Into<Schema> {
    /// Lets an object omit this field; the key is then absent from the
    /// output.
    fn optional(self) -> Schema {
        let mut schema = self.into();
        schema.optional = true;
        schema
    }

    /// Accepts `Null` and passes it through without running checks or
    /// effects.
    fn nullable(self) -> Schema {
        let mut schema = self.into();
        schema.nullable = true;
        schema
    }

    /// Substitutes `value` when an object omits this field. The default
    /// is validated like any other input.
    fn with_default(self, value: impl Into<Value>) -> Schema {
        let mut schema = self.into();
        schema.default = Some(value.into());
        schema
    }

    /// Replaces the output with `f(output)`.
    fn transform<F>(self, f: F) -> Schema
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.into().with_effect(Effect::Transform(Arc::new(f)))
    }

    /// Transform that may report issues and reject the value.
    ///
    /// ```rust
    /// use sieve_schema::{Parse, SchemaExt, Value, object, string};
    ///
    /// let schema = object().field(
    ///     "username",
    ///     string().transform_with(|data, ctx| match data.as_str() {
    ///         Some(s) if s == s.to_uppercase() => Ok(data),
    ///         _ => Err(ctx.reject("username harus uppercase")),
    ///     }),
    /// );
    ///
    /// let input = Value::object([("username", "farhan")]);
    /// let issues = schema.safe_parse(input).issues().to_vec();
    /// assert_eq!(issues[0].path_string(), "username");
    /// assert_eq!(issues[0].message, "username harus uppercase");
    /// ```
    fn transform_with<F>(self, f: F) -> Schema
    where
        F: Fn(Value, &mut RefinementCtx) -> Result<Value, Rejected> + Send + Sync + 'static,
    {
        self.into().with_effect(Effect::TransformWith(Arc::new(f)))
    }

    /// Adds a `custom` issue with `message` when `predicate` is false.
    fn refine<F>(self, predicate: F, message: impl Into<Cow<'static, str>>) -> Schema
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.into().with_effect(Effect::Refine {
            predicate: Arc::new(predicate),
            message: message.into(),
        })
    }

    /// Check that reports its own issues; any issue fails the node.
    fn super_refine<F>(self, f: F) -> Schema
    where
        F: Fn(&Value, &mut RefinementCtx) + Send + Sync + 'static,
    {
        self.into().with_effect(Effect::SuperRefine(Arc::new(f)))
    }
}

impl<T: Into<Schema>> SchemaExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Issue, IssueCode};
    use crate::{number, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn builders_convert_to_matching_kind() {
        let schema: Schema = string().min(1).into();
        assert_eq!(schema.expected_kind(), ValueKind::String);
        assert!(matches!(schema.kind(), SchemaKind::String(_)));
        assert!(!schema.is_optional());
    }

    #[test]
    fn nullable_accepts_null_only() {
        let schema = string().min(3).nullable();
        assert_eq!(schema.parse(Value::Null).unwrap(), Value::Null);
        assert!(schema.safe_parse(1).is_failure());

        let strict = Schema::from(string());
        assert_eq!(
            strict.safe_parse(Value::Null).issues()[0].message,
            "Expected string, received null"
        );
    }

    #[test]
    fn effects_run_only_after_base_check() {
        let schema = number().min(10.0).transform(|_| Value::from("never"));
        let result = schema.safe_parse(5);
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn transform_can_change_type() {
        let schema = string().transform(|v| Value::from(v.as_str().map_or(0, str::len)));
        assert_eq!(schema.parse("farhan").unwrap(), Value::from(6));
    }

    #[test]
    fn refine_reports_custom_issue() {
        let even = number().refine(|v| v.as_f64().is_some_and(|n| n % 2.0 == 0.0), "must be even");
        assert!(even.safe_parse(4).is_success());

        let result = even.safe_parse(3);
        assert_eq!(result.issues()[0].code, IssueCode::Custom);
        assert_eq!(result.issues()[0].message, "must be even");
    }

    #[test]
    fn super_refine_can_report_many() {
        let schema = string().super_refine(|v, ctx| {
            let s = v.as_str().unwrap_or_default();
            if !s.contains('@') {
                ctx.custom("missing @");
            }
            if s.len() < 5 {
                ctx.add_issue(Issue::too_small(5, "too short"));
            }
        });
        assert_eq!(schema.safe_parse("ab").issues().len(), 2);
        assert!(schema.safe_parse("a@b.c").is_success());
    }

    #[test]
    fn modifiers_keep_earlier_effects() {
        let schema = string()
            .transform(|v| Value::from(v.as_str().unwrap_or_default().to_uppercase()))
            .optional()
            .refine(|v| v.as_str() != Some("ADMIN"), "reserved");

        assert!(schema.is_optional());
        assert_eq!(schema.safe_parse("admin").issues()[0].message, "reserved");
        assert_eq!(schema.parse("farhan").unwrap(), Value::from("FARHAN"));
    }

    #[test]
    fn schemas_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Schema>();
    }
}
