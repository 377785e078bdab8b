//! Tests for the schema module

use super::*;
use crate::error::Error;
use crate::types::ValueType;
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_schema() -> ResourceSchema {
    ResourceSchema::new("gitlab_sample", "A sample resource")
        .attribute(Attribute::required("name", ValueType::String).force_new())
        .attribute(Attribute::optional("description", ValueType::String))
        .attribute(
            Attribute::optional("project_key", ValueType::String).default_value(json!("")),
        )
        .attribute(Attribute::optional_computed("push_events", ValueType::Boolean))
        .attribute(Attribute::required("password", ValueType::String).sensitive())
        .attribute(Attribute::computed("avatar_url", ValueType::String))
        .attribute(Attribute::optional("user_id", ValueType::Integer))
}

#[test]
fn test_validate_fills_defaults_and_drops_nulls() {
    let schema = sample_schema();
    let out = schema
        .validate_desired(&json!({"name": "a", "password": "p", "description": null}))
        .unwrap();

    assert_eq!(
        serde_json::Value::Object(out),
        json!({"name": "a", "password": "p", "project_key": ""})
    );
}

#[test]
fn test_validate_strips_computed() {
    let schema = sample_schema();
    let out = schema
        .validate_desired(&json!({
            "name": "a",
            "password": "p",
            "avatar_url": "https://gitlab.example.com/uploads/a.png"
        }))
        .unwrap();

    assert!(!out.contains_key("avatar_url"));
}

#[test]
fn test_validate_missing_required() {
    let schema = sample_schema();
    let err = schema.validate_desired(&json!({"name": "a"})).unwrap_err();

    assert!(matches!(err, Error::MissingRequiredField { ref field, .. } if field == "password"));
}

#[test]
fn test_validate_rejects_unknown_attribute() {
    let schema = sample_schema();
    let err = schema
        .validate_desired(&json!({"name": "a", "password": "p", "colour": "red"}))
        .unwrap_err();

    assert!(matches!(err, Error::InvalidAttribute { ref attribute, .. } if attribute == "colour"));
}

#[test]
fn test_validate_rejects_wrong_type() {
    let schema = sample_schema();
    let err = schema
        .validate_desired(&json!({"name": "a", "password": "p", "user_id": "12"}))
        .unwrap_err();

    assert!(matches!(err, Error::InvalidAttribute { ref attribute, .. } if attribute == "user_id"));
}

#[test]
fn test_validate_rejects_non_object() {
    let schema = sample_schema();
    assert!(schema.validate_desired(&json!(["name"])).is_err());
}

#[test]
fn test_schema_lookups() {
    let schema = sample_schema();

    assert_eq!(schema.force_new_attributes(), vec!["name"]);
    assert_eq!(schema.sensitive_attributes(), vec!["password"]);
    assert!(schema.get("push_events").unwrap().kind.is_settable());
    assert!(!schema.get("avatar_url").unwrap().kind.is_settable());
    assert!(schema.get("missing").is_none());
}

#[test]
fn test_schema_serializes_for_hosts() {
    let schema = ResourceSchema::new("gitlab_sample", "A sample resource")
        .attribute(Attribute::required("password", ValueType::String).sensitive());
    let rendered = serde_json::to_value(&schema).unwrap();

    assert_eq!(
        rendered,
        json!({
            "type_name": "gitlab_sample",
            "description": "A sample resource",
            "attributes": [{
                "name": "password",
                "kind": "required",
                "type": "string",
                "description": "",
                "sensitive": true
            }]
        })
    );
}
