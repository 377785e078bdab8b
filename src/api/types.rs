//! GitLab REST entities

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// GitLab reports unset fields as `null` rather than omitting them
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of `GET /version`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version string, e.g. `15.1.0-ee`
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub revision: String,
}

/// The authenticated user (`GET /user`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
}

/// A project, as much of it as the provider looks at
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_with_namespace: String,
}

/// A project topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Only reported by GitLab 15.0 and newer
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub total_projects_count: u64,
}

/// A direct member of a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    /// The user id
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub access_level: u32,
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
}

/// Connection settings of the Jira integration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraProperties {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub jira_issue_transition_id: String,
}

/// The Jira integration of a project (`/projects/:id/services/jira`)
///
/// The password is write-only and never part of the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraService {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub push_events: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues_events: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commit_events: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub merge_requests_events: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_push_events: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note_events: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pipeline_events: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_events: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment_on_event_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: JiraProperties,
}
