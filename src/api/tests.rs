//! Tests for the GitLab API client

use super::*;
use crate::capability::{supports_feature, VersionReporter};
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::JsonObject;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gitlab_for(server: &MockServer) -> GitlabClient {
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api/v4", server.uri()))
        .max_retries(0)
        .no_rate_limit()
        .build();
    GitlabClient::new(HttpClient::with_config(config).unwrap())
}

fn object(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("not an object"),
    }
}

#[test]
fn test_encode_project() {
    assert_eq!(encode_project("42"), "42");
    assert_eq!(encode_project("group/sub/project"), "group%2Fsub%2Fproject");
}

#[tokio::test]
async fn test_version_reporter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/version"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"version": "14.8.0-ee", "revision": "abc"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = gitlab_for(&server);
    assert_eq!(client.version().await.unwrap(), "14.8.0-ee");
    assert!(!supports_feature(&client, "14.9").await.unwrap());
}

#[tokio::test]
async fn test_get_topic_tolerates_nulls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/topics/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "topic-a",
            "title": "Topic A",
            "description": null,
            "total_projects_count": 3,
            "avatar_url": null
        })))
        .mount(&server)
        .await;

    let topic = gitlab_for(&server).get_topic(42).await.unwrap();

    assert_eq!(topic.id, 42);
    assert_eq!(topic.title.as_deref(), Some("Topic A"));
    assert_eq!(topic.description, None);
    assert_eq!(topic.total_projects_count, 3);
}

#[tokio::test]
async fn test_create_topic_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/topics"))
        .and(body_json(json!({"name": "topic-a", "title": "Topic A"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 42, "name": "topic-a"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let topic = gitlab_for(&server)
        .create_topic(object(json!({"name": "topic-a", "title": "Topic A"})), None)
        .await
        .unwrap();

    assert_eq!(topic.id, 42);
}

#[tokio::test]
async fn test_update_topic_with_avatar_is_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/topics/42"))
        .and(body_string_contains("name=\"description\""))
        .and(body_string_contains("filename=\"logo.png\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let avatar = crate::avatar::Avatar {
        filename: "logo.png".to_string(),
        bytes: b"png".to_vec(),
    };
    gitlab_for(&server)
        .update_topic(42, object(json!({"description": "new"})), Some(&avatar))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_topic() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v4/topics/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    gitlab_for(&server).delete_topic(42).await.unwrap();
}

#[tokio::test]
async fn test_project_member_with_namespaced_project() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/group%2Fproject/members/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "username": "jdoe",
            "name": "J Doe",
            "state": "active",
            "access_level": 30,
            "expires_at": "2030-01-31"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let member = gitlab_for(&server)
        .get_project_member("group/project", 7)
        .await
        .unwrap();

    assert_eq!(member.id, 7);
    assert_eq!(member.access_level, 30);
    assert_eq!(member.expires_at, NaiveDate::from_ymd_opt(2030, 1, 31));
}

#[tokio::test]
async fn test_project_member_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/5/members/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "404 Not found"})))
        .mount(&server)
        .await;

    let err = gitlab_for(&server)
        .get_project_member("5", 7)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_add_and_edit_project_member() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/5/members"))
        .and(body_json(json!({"user_id": 7, "access_level": 30})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 7, "access_level": 30})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/5/members/7"))
        .and(body_json(json!({"access_level": 40})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 7, "access_level": 40})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = gitlab_for(&server);
    let added = client
        .add_project_member("5", object(json!({"user_id": 7, "access_level": 30})))
        .await
        .unwrap();
    assert_eq!(added.access_level, 30);

    let edited = client
        .edit_project_member("5", 7, object(json!({"access_level": 40})))
        .await
        .unwrap();
    assert_eq!(edited.access_level, 40);
}

#[tokio::test]
async fn test_get_jira_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/5/services/jira"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "title": "Jira",
            "created_at": "2022-03-01T10:00:00.000Z",
            "updated_at": null,
            "active": true,
            "push_events": true,
            "commit_events": false,
            "properties": {
                "url": "https://jira.example.com",
                "username": "bot",
                "project_key": "PROJ",
                "jira_issue_transition_id": null
            }
        })))
        .mount(&server)
        .await;

    let service = gitlab_for(&server).get_jira_service("5").await.unwrap();

    assert_eq!(service.title, "Jira");
    assert!(service.active);
    assert!(service.push_events);
    assert!(service.created_at.is_some());
    assert!(service.updated_at.is_none());
    assert_eq!(service.properties.project_key, "PROJ");
    assert_eq!(service.properties.jira_issue_transition_id, "");
}

#[tokio::test]
async fn test_set_and_delete_jira_service() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/5/services/jira"))
        .and(body_json(json!({"url": "https://jira.example.com", "password": "s3cret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/5/services/jira"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = gitlab_for(&server);
    client
        .set_jira_service(
            "5",
            object(json!({"url": "https://jira.example.com", "password": "s3cret"})),
        )
        .await
        .unwrap();
    client.delete_jira_service("5").await.unwrap();
}
