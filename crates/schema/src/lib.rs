//! # sieve-schema
//!
//! Declarative schemas for [`Value`] trees: build a schema once, then
//! validate any number of inputs against it.
//!
//! - **Primitives**: [`string`], [`number`], [`boolean`], [`date`] with
//!   chained checks (`min`, `max`, `email`, `int`, ...)
//! - **Coercion**: [`coerce`] builders convert raw input before checking
//! - **Composites**: [`object`], [`array`], [`set`], [`map`]
//! - **Effects**: `transform`, `refine`, `super_refine` via [`SchemaExt`]
//! - **Reporting**: every failure becomes an [`Issue`] with a path, a
//!   code and a message
//!
//! ## Quick Start
//!
//! ```rust
//! use sieve_schema::prelude::*;
//!
//! let register = object()
//!     .field("username", string().min(3).max(10))
//!     .field("email", string().email())
//!     .field("age", coerce::number().int().min(17.0).optional());
//!
//! let input = Value::object([
//!     ("username", Value::from("farhan")),
//!     ("email", Value::from("farhan@example.com")),
//!     ("age", Value::from("30")),
//! ]);
//! let output = register.parse(input).unwrap();
//! assert_eq!(output.get("age"), Some(&Value::from(30)));
//! ```
//!
//! ## Results
//!
//! [`Parse::safe_parse`] never fails and returns a [`ValidationResult`];
//! [`Parse::parse`] returns `Result<Value, ValidationError>` with every
//! issue in the error:
//!
//! ```rust
//! use sieve_schema::prelude::*;
//!
//! let err = string().min(3).email().parse("ab").unwrap_err();
//! assert_eq!(err.len(), 2);
//! assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
//! ```

pub mod coerce;
pub mod composite;
mod context;
mod effects;
mod error;
mod options;
pub mod primitive;
mod result;
mod schema;

pub use composite::{ArraySchema, MapSchema, ObjectSchema, SetSchema};
pub use context::{ParseContext, RefinementCtx, Rejected};
pub use error::{
    FlattenedErrors, Issue, IssueCode, Path, PathSegment, SchemaError, ValidationError,
    format_path,
};
pub use options::{ParseOptions, UnknownKeys};
pub use primitive::{BooleanSchema, DateSchema, NumberSchema, StringSchema};
pub use result::ValidationResult;
pub use schema::{Parse, Schema, SchemaExt, SchemaKind};
pub use sieve_value::{Object, Value, ValueKind, ValueMap, ValueSet};

// ============================================================================
// BUILDERS
// ============================================================================

/// String schema without coercion.
pub fn string() -> StringSchema {
    StringSchema::new()
}

/// Number schema without coercion.
pub fn number() -> NumberSchema {
    NumberSchema::new()
}

pub fn boolean() -> BooleanSchema {
    BooleanSchema::new()
}

/// Date schema; only [`Value::Date`] passes unless coercion is enabled.
pub fn date() -> DateSchema {
    DateSchema::new()
}

/// Object schema with no fields; add them with [`ObjectSchema::field`].
pub fn object() -> ObjectSchema {
    ObjectSchema::new()
}

pub fn array(element: impl Into<Schema>) -> ArraySchema {
    ArraySchema::new(element)
}

pub fn set(element: impl Into<Schema>) -> SetSchema {
    SetSchema::new(element)
}

pub fn map(key: impl Into<Schema>, value: impl Into<Schema>) -> MapSchema {
    MapSchema::new(key, value)
}

// ============================================================================
// EXECUTION
// ============================================================================

/// Validates `input` against `schema` without failing.
pub fn validate<S: Parse>(schema: &S, input: impl Into<Value>) -> ValidationResult {
    schema.safe_parse(input)
}

/// Validates `input` against `schema`, returning every issue as one error.
pub fn parse<S: Parse>(schema: &S, input: impl Into<Value>) -> Result<Value, ValidationError> {
    schema.parse(input)
}

/// Common imports.
pub mod prelude {
    pub use crate::{
        Issue, IssueCode, Parse, ParseOptions, RefinementCtx, Rejected, Schema, SchemaExt,
        UnknownKeys, ValidationError, ValidationResult, Value, array, boolean, coerce, date, map,
        number, object, set, string, validate,
    };
}
