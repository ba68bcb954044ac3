//! Shape of reported issues: display text, JSON and flattening.

use pretty_assertions::assert_eq;
use sieve_schema::prelude::*;
use sieve_schema::{PathSegment, SchemaError};

fn profile() -> sieve_schema::ObjectSchema {
    object()
        .field("name", string().min(3))
        .field("tags", array(string()))
}

fn bad_profile() -> Value {
    Value::object([
        ("name", Value::from("fa")),
        ("tags", Value::array([Value::from("ok"), Value::from(1)])),
    ])
}

#[test]
fn display_lists_every_issue() {
    let err = profile().parse(bad_profile()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r"
    Validation failed with 2 issue(s):
      1. [name] too_small: String must contain at least 3 character(s)
      2. [tags[1]] invalid_type: Expected string, received number
    ");
}

#[test]
fn issues_serialize_for_programmatic_use() {
    let err = profile().parse(bad_profile()).unwrap_err();
    insta::assert_json_snapshot!(err.issues(), @r#"
    [
      {
        "code": "too_small",
        "path": [
          "name"
        ],
        "message": "String must contain at least 3 character(s)",
        "params": {
          "minimum": "3"
        }
      },
      {
        "code": "invalid_type",
        "path": [
          "tags",
          1
        ],
        "message": "Expected string, received number",
        "params": {
          "expected": "string",
          "received": "number"
        }
      }
    ]
    "#);
}

#[test]
fn custom_issues_have_no_params() {
    let schema = string().refine(|_| false, "never");
    let err = schema.parse("x").unwrap_err();
    assert_eq!(
        err.to_json_value(),
        serde_json::json!([{ "code": "custom", "path": [], "message": "never" }])
    );
}

#[test]
fn path_segments_are_typed() {
    let err = profile().parse(bad_profile()).unwrap_err();
    assert_eq!(
        err.issues()[1].path.as_slice(),
        &[PathSegment::Key("tags".into()), PathSegment::Index(1)]
    );
}

#[test]
fn flatten_groups_by_top_level_field() {
    let schema = string().min(3).refine(|_| false, "unused");
    let root = schema.parse("fa").unwrap_err().flatten();
    assert_eq!(root.form_errors, vec!["String must contain at least 3 character(s)"]);
    assert!(root.field_errors.is_empty());

    let nested = profile().parse(bad_profile()).unwrap_err().flatten();
    assert_eq!(
        nested.field_errors.keys().collect::<Vec<_>>(),
        vec!["name", "tags"]
    );
}

#[test]
fn required_field_params() {
    let err = profile().parse(Value::object_empty()).unwrap_err();
    let issue = &err.issues()[0];
    assert_eq!(issue.param("expected"), Some("string"));
    assert_eq!(issue.param("received"), Some("undefined"));
    assert_eq!(err.issues()[1].param("expected"), Some("array"));
}

#[test]
fn abort_early_reports_one_issue() {
    let options = ParseOptions::default().with_abort_early(true);
    let result = profile().safe_parse_with(bad_profile(), &options);
    assert_eq!(result.issues().len(), 1);
    assert_eq!(result.issues()[0].path_string(), "name");
}

#[test]
fn options_load_from_json() {
    let options = ParseOptions::from_json(r#"{ "unknown_keys": "passthrough", "abort_early": true }"#)
        .unwrap();
    assert_eq!(options.unknown_keys, UnknownKeys::Passthrough);
    assert!(options.abort_early);

    let err = ParseOptions::from_json(r#"{ "unknown": 1 }"#).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidOptions(_)));
}

#[test]
fn error_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync + std::error::Error + 'static>() {}
    assert_send_sync::<ValidationError>();
    assert_send_sync::<SchemaError>();
    assert_send_sync::<Rejected>();
}
