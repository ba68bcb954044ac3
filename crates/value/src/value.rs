//! Unified `Value` enum.
//!
//! This is the central type that schemas consume and produce.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;

use crate::collections::{ValueMap, ValueSet};
use crate::kind::ValueKind;

/// Field map of an object value, in insertion order.
pub type Object = IndexMap<String, Value>;

/// Integral numbers up to this magnitude display without a fraction.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Dynamic value that can represent any input to a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Number (always `f64`)
    Number(f64),

    /// UTF-8 text
    String(String),

    /// Point in time, UTC
    Date(DateTime<Utc>),

    /// Ordered sequence
    Array(Vec<Value>),

    /// Collection of unique values
    Set(ValueSet),

    /// Keyed collection with arbitrary keys
    Map(ValueMap),

    /// Named fields
    Object(Object),
}

impl Value {
    // ==================== Constructors ====================

    /// Create a null value
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create an empty object value
    pub fn object_empty() -> Self {
        Self::Object(Object::new())
    }

    /// Create an object value from `(key, value)` pairs
    pub fn object<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Create an array value
    pub fn array<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Create a set value; duplicates collapse
    pub fn set<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Create a map value from `(key, value)` pairs
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    // ==================== Type queries ====================

    /// Get the kind of this value
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        ValueKind::of(self)
    }

    /// Name of the received type as printed in issue messages.
    ///
    /// Same as `kind().name()` except that `NaN` reports as `"nan"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(n) if n.is_nan() => "nan",
            other => other.kind().name(),
        }
    }

    /// Check if this is null
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    // ==================== Accessors ====================

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get a field from an object value.
    ///
    /// Returns `None` both when the key is absent and when this is not an
    /// object; use [`Value::as_object`] to tell the two apart.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Get an element from an array value.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Self::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Consume the value and return the string it holds, if any.
    #[must_use]
    pub fn into_string(self) -> Option<String> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

// ==================== Display ====================

/// Renders a number the way text coercion does: integral values drop
/// the fraction, non-finite values use `NaN` / `Infinity`.
pub(crate) fn format_number(n: f64, f: &mut Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub(crate) fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => format_number(*n, f),
            Self::String(s) => f.write_str(s),
            Self::Date(d) => f.write_str(&format_date(d)),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Set(set) => {
                f.write_str("Set(")?;
                for (i, item) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::Map(map) => {
                f.write_str("Map(")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key} => {value}")?;
                }
                f.write_str(")")
            }
            Self::Object(fields) => {
                f.write_str("{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}
