//! # sieve-value
//!
//! The dynamic value model that sieve schemas validate, coerce and
//! transform.
//!
//! A [`Value`] is a closed sum over the shapes a schema can describe:
//! scalars (`null`, booleans, numbers, strings, dates) and containers
//! (arrays, sets, maps and objects). Containers own their children, so a
//! value is always a finite tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use sieve_value::{Value, ValueKind, ValueSet};
//!
//! let v = Value::from("farhan");
//! assert_eq!(v.kind(), ValueKind::String);
//!
//! let tags: ValueSet = ["a", "b", "a"].into_iter().map(Value::from).collect();
//! assert_eq!(tags.len(), 2);
//! ```
//!
//! JSON documents convert losslessly into values (objects keep their key
//! order as produced by `serde_json`):
//!
//! ```rust
//! use sieve_value::Value;
//! use serde_json::json;
//!
//! let v = Value::from(json!({ "name": "farhan", "age": 30 }));
//! assert_eq!(v.get("age"), Some(&Value::from(30)));
//! ```

pub mod collections;
mod convert;
pub mod kind;
pub mod value;

pub use collections::{ValueMap, ValueSet};
pub use kind::ValueKind;
pub use value::{Object, Value};
