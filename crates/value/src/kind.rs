//! Value kinds.
//!
//! `ValueKind` is the lightweight classification of a [`Value`]. Its
//! lowercase name is what issue messages print as the expected or
//! received type.

use std::fmt::{self, Display, Formatter};

use crate::Value;

/// Represents the kind of a [`Value`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Date,
    Array,
    Set,
    Map,
    Object,
}

impl ValueKind {
    /// Lowercase name used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Date => "date",
            Self::Array => "array",
            Self::Set => "set",
            Self::Map => "map",
            Self::Object => "object",
        }
    }

    /// Check if this kind is a scalar.
    pub const fn is_primitive(self) -> bool {
        !self.is_container()
    }

    /// Check if this kind holds child values.
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Set | Self::Map | Self::Object)
    }

    /// Get the kind of a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Date(_) => Self::Date,
            Value::Array(_) => Self::Array,
            Value::Set(_) => Self::Set,
            Value::Map(_) => Self::Map,
            Value::Object(_) => Self::Object,
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
