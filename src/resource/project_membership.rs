//! `gitlab_project_membership`
//!
//! A user's direct membership in a project. Identity is
//! `"<project_id>:<user_id>"`; both parts force replacement when changed.

use super::reconciler::Reconciler;
use crate::api::ProjectMember;
use crate::config::ProviderContext;
use crate::error::{Error, Result};
use crate::identity::{build_two_part_id, parse_component, parse_two_part_id};
use crate::mapper::{AttributeMapper, ChangeSet, PayloadBuilder};
use crate::schema::{Attribute, ResourceSchema};
use crate::types::{AccessLevel, JsonObject, ValueType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Declarative state of a project membership
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMembershipState {
    pub project_id: String,
    pub user_id: i64,
    pub access_level: String,
    /// `YYYY-MM-DD`
    pub expires_at: Option<String>,
}

impl ProjectMembershipState {
    fn level(&self) -> Result<AccessLevel> {
        if !AccessLevel::PROJECT_NAMES.contains(&self.access_level.as_str()) {
            return Err(Error::invalid_attribute(
                "access_level",
                format!(
                    "'{}' is not one of {}",
                    self.access_level,
                    AccessLevel::PROJECT_NAMES.join(", ")
                ),
            ));
        }
        self.access_level.parse()
    }

    fn check_expiry(&self) -> Result<()> {
        match self.expires_at.as_deref().filter(|d| !d.is_empty()) {
            Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|e| Error::invalid_attribute("expires_at", format!("'{date}': {e}"))),
            None => Ok(()),
        }
    }
}

impl AttributeMapper for ProjectMembershipState {
    type Entity = ProjectMember;

    fn to_payload(&self, changes: Option<&ChangeSet>) -> JsonObject {
        let access_level = self.level().map(AccessLevel::value).ok();
        let builder = PayloadBuilder::new(changes);
        let builder = match changes {
            None => builder.always("user_id", &self.user_id),
            Some(_) => builder,
        };
        builder
            .always("access_level", &access_level)
            .optional_string("expires_at", &self.expires_at)
            .build()
    }

    fn from_entity(entity: &ProjectMember, prior: &Self) -> Self {
        Self {
            project_id: prior.project_id.clone(),
            user_id: entity.id,
            access_level: AccessLevel::from_value(entity.access_level)
                .map_or_else(|| entity.access_level.to_string(), |l| l.name().to_string()),
            expires_at: entity
                .expires_at
                .map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Reconciler for `gitlab_project_membership`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectMembershipResource;

fn parse_id(id: &str) -> Result<(String, i64)> {
    let (project_id, user_id) = parse_two_part_id(id)?;
    let user_id = parse_component("user_id", &user_id)?;
    Ok((project_id, user_id))
}

#[async_trait::async_trait]
impl Reconciler for ProjectMembershipResource {
    type State = ProjectMembershipState;

    const TYPE_NAME: &'static str = "gitlab_project_membership";

    fn schema() -> ResourceSchema {
        ResourceSchema::new(
            Self::TYPE_NAME,
            "Adds an existing user to an existing project with a set access level.",
        )
        .attribute(
            Attribute::required("project_id", ValueType::String)
                .description("The id or full path of the project.")
                .force_new(),
        )
        .attribute(
            Attribute::required("user_id", ValueType::Integer)
                .description("The id of the user.")
                .force_new(),
        )
        .attribute(
            Attribute::required("access_level", ValueType::String).description(
                "The access level for the member: guest, reporter, developer, maintainer or owner.",
            ),
        )
        .attribute(
            Attribute::optional("expires_at", ValueType::String)
                .description("Expiration date of the membership, formatted YYYY-MM-DD."),
        )
    }

    async fn create(
        &self,
        ctx: &ProviderContext,
        desired: &mut ProjectMembershipState,
    ) -> Result<String> {
        desired.level()?;
        desired.check_expiry()?;

        debug!(
            "Adding user {} to project {}",
            desired.user_id, desired.project_id
        );
        ctx.client()
            .add_project_member(&desired.project_id, desired.to_payload(None))
            .await?;

        Ok(build_two_part_id(
            &desired.project_id,
            &desired.user_id.to_string(),
        ))
    }

    async fn read(
        &self,
        ctx: &ProviderContext,
        id: &str,
        prior: &ProjectMembershipState,
    ) -> Result<ProjectMembershipState> {
        let (project_id, user_id) = parse_id(id)?;
        debug!("Reading membership of user {} in project {}", user_id, project_id);

        let member = ctx.client().get_project_member(&project_id, user_id).await?;
        let seed = ProjectMembershipState {
            project_id,
            ..prior.clone()
        };
        Ok(ProjectMembershipState::from_entity(&member, &seed))
    }

    async fn update(
        &self,
        ctx: &ProviderContext,
        id: &str,
        desired: &mut ProjectMembershipState,
        changes: &ChangeSet,
    ) -> Result<()> {
        let (project_id, user_id) = parse_id(id)?;
        desired.level()?;
        desired.check_expiry()?;

        if changes.is_empty() {
            debug!("Nothing to update for user {} in project {}", user_id, project_id);
            return Ok(());
        }

        debug!("Updating membership of user {} in project {}", user_id, project_id);
        ctx.client()
            .edit_project_member(&project_id, user_id, desired.to_payload(Some(changes)))
            .await?;
        Ok(())
    }

    async fn delete(
        &self,
        ctx: &ProviderContext,
        id: &str,
        _state: &ProjectMembershipState,
    ) -> Result<()> {
        let (project_id, user_id) = parse_id(id)?;
        debug!("Removing user {} from project {}", user_id, project_id);
        ctx.client().delete_project_member(&project_id, user_id).await
    }

    fn import_seed(&self, raw_id: &str) -> Result<ProjectMembershipState> {
        let (project_id, user_id) = parse_id(raw_id)?;
        Ok(ProjectMembershipState {
            project_id,
            user_id,
            ..ProjectMembershipState::default()
        })
    }
}
