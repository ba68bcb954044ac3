//! Walks through a registration form: primitives, coercion, dates,
//! nested objects, collections, custom messages, optional fields,
//! transforms and refinements.
//!
//! Run with `RUST_LOG=sieve_schema=trace` to see coercion and effect
//! tracing.

use chrono::{TimeZone, Utc};
use sieve_schema::prelude::*;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn must_upper_case(data: Value, ctx: &mut RefinementCtx) -> Result<Value, Rejected> {
    match data.as_str() {
        Some(s) if s == s.to_uppercase() => Ok(data),
        _ => Err(ctx.reject("username harus uppercase")),
    }
}

fn report(label: &str, result: &ValidationResult) {
    match result {
        ValidationResult::Success(value) => tracing::info!(%label, %value, "valid"),
        ValidationResult::Failure(issues) => {
            for issue in issues {
                tracing::warn!(%label, %issue, "invalid");
            }
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let birth_min = Utc.with_ymd_and_hms(1980, 1, 1, 0, 0, 0).unwrap();
    let birth_max = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

    let register = object()
        .field(
            "username",
            string()
                .trim()
                .min(3)
                .message("min 3 character")
                .max(10)
                .transform_with(must_upper_case),
        )
        .field("email", string().email().message("harus berupa email"))
        .field("password", string().min(3).max(100))
        .field("price", coerce::number().min(1000.0).max(1_000_000.0))
        .field("is_admin", coerce::boolean().with_default(false))
        .field("birth_date", coerce::date().min(birth_min).max(birth_max))
        .field(
            "address",
            object()
                .field("country", string().min(2))
                .field("city", string().min(2))
                .optional(),
        )
        .field("hobbies", array(string()).min(1).max(5))
        .field("roles", set(string()).nonempty().optional())
        .field("contacts", map(string(), string().email()).optional());

    let good = Value::from(serde_json::json!({
        "username": "  FARHAN ",
        "email": "farhan@example.com",
        "password": "rahasia",
        "price": "10000",
        "birth_date": "1990-01-1",
        "address": { "country": "Indonesia", "city": "Jakarta" },
        "hobbies": ["coding", "reading"],
    }));
    report("good", &validate(&register, good));

    let bad = Value::object([
        ("username", Value::from("farhan")),
        ("email", Value::from("not-an-email")),
        ("password", Value::from("ra")),
        ("price", Value::from("murah")),
        ("birth_date", Value::from("1970-01-01")),
        ("hobbies", Value::array(Vec::<Value>::new())),
        ("contacts", Value::map([("ramadan", "ramadan")])),
    ]);
    let result = validate(&register, bad);
    report("bad", &result);

    if let Err(err) = result.into_result() {
        let flat = err.flatten();
        for (field, messages) in &flat.field_errors {
            tracing::info!(%field, ?messages, "field errors");
        }
    }
}
