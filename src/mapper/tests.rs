//! Tests for the mapper module

use super::*;
use crate::schema::{Attribute, ResourceSchema};
use crate::types::ValueType;
use pretty_assertions::assert_eq;
use serde_json::json;

fn schema() -> ResourceSchema {
    ResourceSchema::new("gitlab_sample", "")
        .attribute(Attribute::required("name", ValueType::String))
        .attribute(Attribute::optional("title", ValueType::String))
        .attribute(Attribute::optional("description", ValueType::String))
        .attribute(Attribute::optional_computed("push_events", ValueType::Boolean))
        .attribute(Attribute::computed("avatar_url", ValueType::String))
}

fn object(value: serde_json::Value) -> crate::types::JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[test]
fn test_changes_detects_modified_attributes() {
    let prior = json!({"name": "a", "title": "A", "description": "old", "avatar_url": "x"});
    let desired = object(json!({"name": "a", "title": "A", "description": "new"}));

    let changes = ChangeSet::between(&schema(), &prior, &desired);

    assert_eq!(changes.iter().collect::<Vec<_>>(), vec!["description"]);
}

#[test]
fn test_changes_ignores_computed_and_omitted_optional_computed() {
    let prior = json!({"name": "a", "push_events": true, "avatar_url": "x"});
    let desired = object(json!({"name": "a"}));

    assert!(ChangeSet::between(&schema(), &prior, &desired).is_empty());

    let desired = object(json!({"name": "a", "push_events": false}));
    let changes = ChangeSet::between(&schema(), &prior, &desired);
    assert!(changes.contains("push_events"));
}

#[test]
fn test_changes_removal_and_empty_string() {
    let prior = json!({"name": "a", "description": "text"});
    let desired = object(json!({"name": "a"}));
    assert!(ChangeSet::between(&schema(), &prior, &desired).contains("description"));

    let prior = json!({"name": "a", "description": ""});
    let desired = object(json!({"name": "a"}));
    assert!(ChangeSet::between(&schema(), &prior, &desired).is_empty());
}

#[test]
fn test_payload_create_sends_set_values() {
    let payload = PayloadBuilder::new(None)
        .required("name", &"topic-a")
        .optional_string("title", &Some("Topic A".to_string()))
        .optional_string("description", &None)
        .optional("push_events", &None::<bool>)
        .sensitive("password", &Some("secret".to_string()))
        .build_value();

    assert_eq!(
        payload,
        json!({"name": "topic-a", "title": "Topic A", "password": "secret"})
    );
}

#[test]
fn test_payload_update_sends_only_changed() {
    let changes = ChangeSet::from_names(["description", "push_events"]);
    let payload = PayloadBuilder::new(Some(&changes))
        .required("name", &"topic-a")
        .optional_string("title", &Some("Topic A".to_string()))
        .optional_string("description", &None)
        .optional("push_events", &Some(false))
        .build_value();

    assert_eq!(payload, json!({"description": "", "push_events": false}));
}

#[test]
fn test_payload_always_and_sensitive_ignore_changes() {
    let changes = ChangeSet::new();
    let payload = PayloadBuilder::new(Some(&changes))
        .always("url", &"https://jira.example.com")
        .sensitive("password", &Some("secret".to_string()))
        .sensitive("token", &Some(String::new()))
        .build_value();

    assert_eq!(
        payload,
        json!({"url": "https://jira.example.com", "password": "secret"})
    );
}

#[test]
fn test_to_multipart_stringifies_values() {
    let payload = object(json!({"name": "topic-a", "active": true, "level": 30}));
    let body = to_multipart(&payload);

    let mut fields = body.fields.clone();
    fields.sort();
    assert_eq!(
        fields,
        vec![
            ("active".to_string(), "true".to_string()),
            ("level".to_string(), "30".to_string()),
            ("name".to_string(), "topic-a".to_string()),
        ]
    );
    assert!(body.files.is_empty());
}

#[test]
fn test_payload_keeps_every_primitive_value() {
    let payload = PayloadBuilder::new(None)
        .always("user_id", &7_i64)
        .always("access_level", &Some(30_u32))
        .always("expires_at", &None::<String>)
        .optional("push_events", &Some(true))
        .required("name", &"topic-a".to_string())
        .build_value();

    assert_eq!(
        payload,
        json!({
            "user_id": 7,
            "access_level": 30,
            "expires_at": null,
            "push_events": true,
            "name": "topic-a"
        })
    );
}
