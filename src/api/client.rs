//! Typed GitLab REST client

use super::types::{JiraService, Project, ProjectMember, Topic, User, VersionInfo};
use crate::avatar::Avatar;
use crate::capability::VersionReporter;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::mapper::to_multipart;
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

/// Percent-encode a project id or `namespace/path` for use in a URL path
pub fn encode_project(project: &str) -> String {
    urlencoding::encode(project).into_owned()
}

/// GitLab API v4 client
///
/// Cheap to clone; clones share the connection pool and rate limiter.
#[derive(Debug, Clone)]
pub struct GitlabClient {
    http: HttpClient,
}

impl GitlabClient {
    /// Wrap a configured HTTP client whose base URL points at `/api/v4`
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // ------------------------------------------------------------------------
    // Instance
    // ------------------------------------------------------------------------

    /// `GET /version`
    pub async fn version_info(&self) -> Result<VersionInfo> {
        self.http.get_json("version").await
    }

    /// `GET /user`
    pub async fn current_user(&self) -> Result<User> {
        self.http.get_json("user").await
    }

    /// `GET /projects/:id`
    pub async fn get_project(&self, project: &str) -> Result<Project> {
        debug!("Reading project {}", project);
        self.http
            .get_json(&format!("projects/{}", encode_project(project)))
            .await
    }

    // ------------------------------------------------------------------------
    // Topics
    // ------------------------------------------------------------------------

    /// `GET /topics/:id`
    pub async fn get_topic(&self, id: i64) -> Result<Topic> {
        self.http.get_json(&format!("topics/{id}")).await
    }

    /// `POST /topics`, as multipart when an avatar is attached
    pub async fn create_topic(&self, payload: JsonObject, avatar: Option<&Avatar>) -> Result<Topic> {
        let config = Self::topic_body(payload, avatar);
        self.http.request_json(Method::POST, "topics", config).await
    }

    /// `PUT /topics/:id`, as multipart when an avatar is attached
    pub async fn update_topic(
        &self,
        id: i64,
        payload: JsonObject,
        avatar: Option<&Avatar>,
    ) -> Result<Topic> {
        let config = Self::topic_body(payload, avatar);
        self.http
            .request_json(Method::PUT, &format!("topics/{id}"), config)
            .await
    }

    /// `DELETE /topics/:id` (GitLab 14.9 and newer)
    pub async fn delete_topic(&self, id: i64) -> Result<()> {
        self.http.delete(&format!("topics/{id}")).await?;
        Ok(())
    }

    fn topic_body(payload: JsonObject, avatar: Option<&Avatar>) -> RequestConfig {
        match avatar {
            Some(avatar) => RequestConfig::new().multipart(avatar.attach(to_multipart(&payload))),
            None => RequestConfig::new().json(JsonValue::Object(payload)),
        }
    }

    // ------------------------------------------------------------------------
    // Project members
    // ------------------------------------------------------------------------

    fn member_path(project: &str, user_id: i64) -> String {
        format!("projects/{}/members/{user_id}", encode_project(project))
    }

    /// `GET /projects/:id/members/:user_id`
    pub async fn get_project_member(&self, project: &str, user_id: i64) -> Result<ProjectMember> {
        self.http.get_json(&Self::member_path(project, user_id)).await
    }

    /// `POST /projects/:id/members`
    pub async fn add_project_member(
        &self,
        project: &str,
        payload: JsonObject,
    ) -> Result<ProjectMember> {
        self.http
            .request_json(
                Method::POST,
                &format!("projects/{}/members", encode_project(project)),
                RequestConfig::new().json(JsonValue::Object(payload)),
            )
            .await
    }

    /// `PUT /projects/:id/members/:user_id`
    pub async fn edit_project_member(
        &self,
        project: &str,
        user_id: i64,
        payload: JsonObject,
    ) -> Result<ProjectMember> {
        self.http
            .request_json(
                Method::PUT,
                &Self::member_path(project, user_id),
                RequestConfig::new().json(JsonValue::Object(payload)),
            )
            .await
    }

    /// `DELETE /projects/:id/members/:user_id`
    pub async fn delete_project_member(&self, project: &str, user_id: i64) -> Result<()> {
        self.http
            .delete(&Self::member_path(project, user_id))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Jira integration
    // ------------------------------------------------------------------------

    fn jira_path(project: &str) -> String {
        format!("projects/{}/services/jira", encode_project(project))
    }

    /// `GET /projects/:id/services/jira`
    pub async fn get_jira_service(&self, project: &str) -> Result<JiraService> {
        self.http.get_json(&Self::jira_path(project)).await
    }

    /// `PUT /projects/:id/services/jira`; creates or replaces the integration
    pub async fn set_jira_service(&self, project: &str, payload: JsonObject) -> Result<()> {
        self.http
            .put(&Self::jira_path(project), JsonValue::Object(payload))
            .await?;
        Ok(())
    }

    /// `DELETE /projects/:id/services/jira`
    pub async fn delete_jira_service(&self, project: &str) -> Result<()> {
        self.http.delete(&Self::jira_path(project)).await?;
        Ok(())
    }
}

#[async_trait]
impl VersionReporter for GitlabClient {
    async fn version(&self) -> Result<String> {
        Ok(self.version_info().await?.version)
    }
}
