//! Best-effort conversion of raw input before type checking.
//!
//! Coercion never reports issues. When a value cannot be converted it is
//! returned unchanged and the type check that follows rejects it with
//! `invalid_type`. A value that already has the target kind is returned
//! as is.
//!
//! The builders in this module return schemas with coercion enabled:
//!
//! ```rust
//! use sieve_schema::{Parse, Value, coerce};
//!
//! let price = coerce::number().min(1000.0).max(1_000_000.0);
//! assert_eq!(price.parse("10000").unwrap(), Value::from(10_000));
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sieve_value::{Value, ValueKind};

use crate::primitive::{BooleanSchema, DateSchema, NumberSchema, StringSchema};

/// String schema that converts numbers, booleans, dates and null to text.
pub fn string() -> StringSchema {
    StringSchema::new().coerce()
}

/// Number schema that parses numeric strings and maps booleans to 0/1.
pub fn number() -> NumberSchema {
    NumberSchema::new().coerce()
}

/// Boolean schema that accepts `"true"` / `"false"` and numbers.
pub fn boolean() -> BooleanSchema {
    BooleanSchema::new().coerce()
}

/// Date schema that parses ISO-8601 strings and millisecond timestamps.
pub fn date() -> DateSchema {
    DateSchema::new().coerce()
}

/// Converts `value` towards `target`.
///
/// Only primitive targets convert; for container targets the value is
/// returned unchanged.
pub fn coerce(target: ValueKind, value: Value) -> Value {
    let converted = match target {
        ValueKind::String => to_string(value),
        ValueKind::Number => to_number(value),
        ValueKind::Boolean => to_boolean(value),
        ValueKind::Date => to_date(value),
        _ => Err(value),
    };

    converted.unwrap_or_else(|value| {
        tracing::trace!(
            target_kind = %target,
            received = value.type_name(),
            "coercion left value unchanged"
        );
        value
    })
}

fn to_string(value: Value) -> Result<Value, Value> {
    match value {
        Value::String(_) => Ok(value),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Date(_) => {
            Ok(Value::String(value.to_string()))
        }
        other => Err(other),
    }
}

fn to_number(value: Value) -> Result<Value, Value> {
    match value {
        Value::Number(_) => Ok(value),
        Value::Bool(b) => Ok(Value::Number(if b { 1.0 } else { 0.0 })),
        Value::Date(d) => Ok(Value::Number(d.timestamp_millis() as f64)),
        Value::String(ref s) => parse_number(s).map_or(Err(value), |n| Ok(Value::Number(n))),
        other => Err(other),
    }
}

/// Decimal or exponent notation, or a spelled-out `Infinity`.
///
/// `inf`, `nan` and other non-finite spellings are not numbers here.
fn parse_number(input: &str) -> Option<f64> {
    let input = input.trim();
    match input {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => input.parse::<f64>().ok().filter(|n| n.is_finite()),
    }
}

fn to_boolean(value: Value) -> Result<Value, Value> {
    match value {
        Value::Bool(_) => Ok(value),
        Value::Number(n) if !n.is_nan() => Ok(Value::Bool(n != 0.0)),
        Value::String(ref s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if s.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(value)
            }
        }
        other => Err(other),
    }
}

fn to_date(value: Value) -> Result<Value, Value> {
    match value {
        Value::Date(_) => Ok(value),
        Value::Number(n) if n.is_finite() => {
            DateTime::from_timestamp_millis(n as i64).map_or(Err(value), |d| Ok(Value::Date(d)))
        }
        Value::String(ref s) => parse_date(s).map_or(Err(value), |d| Ok(Value::Date(d))),
        other => Err(other),
    }
}

/// Parses the ISO-8601 shapes accepted for dates.
///
/// - RFC 3339 with offset: `1990-01-01T10:00:00+07:00`
/// - local date-time read as UTC: `1990-01-01T10:00:00`, `1990-01-01 10:00:00.5`
/// - calendar date, one or two digit month/day: `1990-01-01`, `1990-1-1`
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(d) = DateTime::parse_from_rfc3339(input) {
        return Some(d.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(d) = NaiveDateTime::parse_from_str(input, format) {
            return Some(d.and_utc());
        }
    }

    parse_calendar_date(input).map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
}

fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let mut parts = input.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some()
        || year.len() != 4
        || !(1..=2).contains(&month.len())
        || !(1..=2).contains(&day.len())
    {
        return None;
    }
    let all_digits = [year, month, day]
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()));
    if !all_digits {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
