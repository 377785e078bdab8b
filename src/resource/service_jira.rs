//! `gitlab_service_jira`
//!
//! The Jira integration of one project, addressed by the project id. GitLab
//! models integrations as a singleton per project: setting one is an
//! upsert, so create and update issue the same `PUT`.

use super::reconciler::Reconciler;
use crate::api::JiraService;
use crate::config::ProviderContext;
use crate::error::{Error, Result};
use crate::mapper::{AttributeMapper, ChangeSet, PayloadBuilder};
use crate::schema::{Attribute, ResourceSchema};
use crate::types::{JsonObject, ValueType};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

const EVENT_FLAGS: [&str; 9] = [
    "push_events",
    "issues_events",
    "commit_events",
    "merge_requests_events",
    "tag_push_events",
    "note_events",
    "pipeline_events",
    "job_events",
    "comment_on_event_enabled",
];

/// Declarative state of a project's Jira integration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraServiceState {
    pub project: String,
    pub url: String,
    pub username: String,
    /// Write-only; carried over from prior state on read
    pub password: String,
    pub project_key: String,
    pub jira_issue_transition_id: Option<String>,

    pub push_events: Option<bool>,
    pub issues_events: Option<bool>,
    pub commit_events: Option<bool>,
    pub merge_requests_events: Option<bool>,
    pub tag_push_events: Option<bool>,
    pub note_events: Option<bool>,
    pub pipeline_events: Option<bool>,
    pub job_events: Option<bool>,
    pub comment_on_event_enabled: Option<bool>,

    pub title: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub active: Option<bool>,
}

impl JiraServiceState {
    fn check_url(&self) -> Result<()> {
        let parsed = Url::parse(&self.url)
            .map_err(|e| Error::invalid_attribute("url", format!("'{}': {e}", self.url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_attribute(
                "url",
                format!("'{}' must be an http or https URL", self.url),
            ));
        }
        Ok(())
    }

    fn flags(&self) -> [(&'static str, Option<bool>); 9] {
        [
            (EVENT_FLAGS[0], self.push_events),
            (EVENT_FLAGS[1], self.issues_events),
            (EVENT_FLAGS[2], self.commit_events),
            (EVENT_FLAGS[3], self.merge_requests_events),
            (EVENT_FLAGS[4], self.tag_push_events),
            (EVENT_FLAGS[5], self.note_events),
            (EVENT_FLAGS[6], self.pipeline_events),
            (EVENT_FLAGS[7], self.job_events),
            (EVENT_FLAGS[8], self.comment_on_event_enabled),
        ]
    }
}

impl AttributeMapper for JiraServiceState {
    type Entity = JiraService;

    // Setting the integration replaces it, so the full desired state is sent
    fn to_payload(&self, _changes: Option<&ChangeSet>) -> JsonObject {
        let builder = PayloadBuilder::new(None)
            .required("url", &self.url)
            .required("username", &self.username)
            .required("project_key", &self.project_key)
            .sensitive("password", &Some(self.password.clone()))
            .optional_string("jira_issue_transition_id", &self.jira_issue_transition_id);

        self.flags()
            .iter()
            .fold(builder, |builder, (name, value)| builder.optional(name, value))
            .build()
    }

    fn from_entity(entity: &JiraService, prior: &Self) -> Self {
        let properties = &entity.properties;
        let echoed = |remote: &str, local: &String| {
            if remote.is_empty() {
                local.clone()
            } else {
                remote.to_string()
            }
        };

        Self {
            project: prior.project.clone(),
            url: echoed(&properties.url, &prior.url),
            username: echoed(&properties.username, &prior.username),
            password: prior.password.clone(),
            project_key: echoed(&properties.project_key, &prior.project_key),
            jira_issue_transition_id: if properties.jira_issue_transition_id.is_empty() {
                prior.jira_issue_transition_id.clone()
            } else {
                Some(properties.jira_issue_transition_id.clone())
            },
            push_events: Some(entity.push_events),
            issues_events: Some(entity.issues_events),
            commit_events: Some(entity.commit_events),
            merge_requests_events: Some(entity.merge_requests_events),
            tag_push_events: Some(entity.tag_push_events),
            note_events: Some(entity.note_events),
            pipeline_events: Some(entity.pipeline_events),
            job_events: Some(entity.job_events),
            comment_on_event_enabled: Some(entity.comment_on_event_enabled),
            title: Some(entity.title.clone()),
            created_at: entity.created_at.map(|t| t.to_rfc3339()),
            updated_at: entity.updated_at.map(|t| t.to_rfc3339()),
            active: Some(entity.active),
        }
    }
}

/// Reconciler for `gitlab_service_jira`
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceJiraResource;

impl ServiceJiraResource {
    async fn set(&self, ctx: &ProviderContext, desired: &JiraServiceState) -> Result<()> {
        desired.check_url()?;
        debug!("Setting Jira integration of project {}", desired.project);
        ctx.client()
            .set_jira_service(&desired.project, desired.to_payload(None))
            .await
    }
}

#[async_trait::async_trait]
impl Reconciler for ServiceJiraResource {
    type State = JiraServiceState;

    const TYPE_NAME: &'static str = "gitlab_service_jira";

    fn schema() -> ResourceSchema {
        let flags = EVENT_FLAGS.iter().map(|&name| {
            Attribute::optional_computed(name, ValueType::Boolean)
                .description("Enable notifications for this event type.")
        });

        ResourceSchema::new(
            Self::TYPE_NAME,
            "Manages the lifecycle of a project integration with Jira.",
        )
        .attribute(
            Attribute::required("project", ValueType::String)
                .description("ID of the project you want to activate integration on.")
                .force_new(),
        )
        .attribute(
            Attribute::required("url", ValueType::String)
                .description("The URL to the Jira project which is being linked to this GitLab project."),
        )
        .attribute(
            Attribute::required("username", ValueType::String)
                .description("The username of the user created to be used with GitLab/Jira."),
        )
        .attribute(
            Attribute::required("password", ValueType::String)
                .description("The password of the user created to be used with GitLab/Jira.")
                .sensitive(),
        )
        .attribute(
            Attribute::optional("project_key", ValueType::String)
                .description("The short identifier for your Jira project, all uppercase.")
                .default_value(serde_json::json!("")),
        )
        .attribute(
            Attribute::optional("jira_issue_transition_id", ValueType::String)
                .description("The ID of a transition that moves issues to a closed state."),
        )
        .attributes(flags)
        .attribute(Attribute::computed("title", ValueType::String).description("Title."))
        .attribute(Attribute::computed("created_at", ValueType::String).description("Create time."))
        .attribute(Attribute::computed("updated_at", ValueType::String).description("Update time."))
        .attribute(Attribute::computed("active", ValueType::Boolean).description("Whether the integration is active."))
    }

    async fn create(&self, ctx: &ProviderContext, desired: &mut JiraServiceState) -> Result<String> {
        self.set(ctx, desired).await?;
        Ok(desired.project.clone())
    }

    async fn read(
        &self,
        ctx: &ProviderContext,
        id: &str,
        prior: &JiraServiceState,
    ) -> Result<JiraServiceState> {
        let project = ctx.client().get_project(id).await?;
        debug!(
            "Reading Jira integration of project {} ({})",
            id, project.path_with_namespace
        );

        let service = ctx.client().get_jira_service(id).await?;
        let seed = JiraServiceState {
            project: id.to_string(),
            ..prior.clone()
        };
        Ok(JiraServiceState::from_entity(&service, &seed))
    }

    async fn update(
        &self,
        ctx: &ProviderContext,
        _id: &str,
        desired: &mut JiraServiceState,
        _changes: &ChangeSet,
    ) -> Result<()> {
        self.set(ctx, desired).await
    }

    async fn delete(&self, ctx: &ProviderContext, id: &str, _state: &JiraServiceState) -> Result<()> {
        debug!("Deleting Jira integration of project {}", id);
        ctx.client().delete_jira_service(id).await
    }

    fn import_seed(&self, raw_id: &str) -> Result<JiraServiceState> {
        Ok(JiraServiceState {
            project: raw_id.to_string(),
            ..JiraServiceState::default()
        })
    }
}
