//! `gitlab_topic`
//!
//! Topics label projects. Their identity is the numeric topic id. GitLab
//! 15.0 introduced `title` and made it mandatory; true deletion arrived
//! in 14.9, before which a topic can only be emptied (`soft_destroy`).

use super::reconciler::Reconciler;
use crate::api;
use crate::avatar::{avatar_for_create, avatar_for_update, AvatarChange};
use crate::capability::CapabilityGate;
use crate::config::ProviderContext;
use crate::error::{Error, Result};
use crate::identity::parse_component;
use crate::mapper::{AttributeMapper, ChangeSet, PayloadBuilder};
use crate::schema::{Attribute, ResourceSchema};
use crate::types::{JsonObject, JsonValue, OptionStringExt, ValueType};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// First GitLab version that knows (and requires) topic titles
pub const TITLE_MIN_VERSION: &str = "15.0";

/// First GitLab version that can delete topics
pub const DELETE_MIN_VERSION: &str = "14.9";

/// Declarative state of a topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicState {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub soft_destroy: Option<bool>,
    /// Local path of the avatar image
    pub avatar: Option<String>,
    pub avatar_hash: Option<String>,
    pub avatar_url: Option<String>,
}

impl AttributeMapper for TopicState {
    type Entity = api::Topic;

    fn to_payload(&self, changes: Option<&ChangeSet>) -> JsonObject {
        PayloadBuilder::new(changes)
            .required("name", &self.name)
            .optional_string("title", &self.title)
            .optional_string("description", &self.description)
            .build()
    }

    fn from_entity(entity: &api::Topic, prior: &Self) -> Self {
        Self {
            name: entity.name.clone(),
            title: Some(entity.title.clone().unwrap_or_default()),
            description: Some(entity.description.clone().unwrap_or_default()),
            avatar_url: entity.avatar_url.clone(),
            // Local-only attributes
            soft_destroy: prior.soft_destroy,
            avatar: prior.avatar.clone(),
            avatar_hash: prior.avatar_hash.clone(),
        }
    }
}

/// Reconciler for `gitlab_topic`
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicResource;

fn topic_id(id: &str) -> Result<i64> {
    parse_component("topic_id", id)
}

async fn ensure_title_support(gate: &CapabilityGate<'_>, state: &TopicState) -> Result<()> {
    let supplied = state.title.clone().none_if_empty().is_some();
    gate.check_introduced_required("title", supplied, TITLE_MIN_VERSION)
        .await
}

#[async_trait::async_trait]
impl Reconciler for TopicResource {
    type State = TopicState;

    const TYPE_NAME: &'static str = "gitlab_topic";

    fn schema() -> ResourceSchema {
        ResourceSchema::new(
            Self::TYPE_NAME,
            "Manages the lifecycle of topics that are then assignable to projects. \
             Deleting a topic requires GitLab 14.9; on older versions set `soft_destroy` \
             to empty the topic instead.",
        )
        .attribute(Attribute::required("name", ValueType::String).description("The topic's name."))
        .attribute(
            Attribute::optional("title", ValueType::String).description(
                "The topic's title. Requires at least GitLab 15.0, for which it is required.",
            ),
        )
        .attribute(
            Attribute::optional("description", ValueType::String)
                .description("A text describing the topic."),
        )
        .attribute(
            Attribute::optional("soft_destroy", ValueType::Boolean)
                .description("Empty the topic's fields instead of deleting it.")
                .deprecated(
                    "GitLab 14.9 introduced the proper deletion of topics. This field is no longer needed.",
                ),
        )
        .attribute(
            Attribute::optional("avatar", ValueType::String)
                .description("A local path to the avatar image to upload. Not available for imported resources."),
        )
        .attribute(
            Attribute::optional_computed("avatar_hash", ValueType::String).description(
                "The SHA-256 of the avatar image. Changing it triggers a re-upload; computed when omitted.",
            ),
        )
        .attribute(
            Attribute::computed("avatar_url", ValueType::String)
                .description("The URL of the avatar image."),
        )
    }

    async fn create(&self, ctx: &ProviderContext, desired: &mut TopicState) -> Result<String> {
        let gate = CapabilityGate::new(ctx.client());
        ensure_title_support(&gate, desired).await?;

        let payload = desired.to_payload(None);
        let avatar = avatar_for_create(desired.avatar.as_deref()).await?;
        if let Some(avatar) = &avatar {
            if desired.avatar_hash.clone().none_if_empty().is_none() {
                desired.avatar_hash = Some(avatar.sha256());
            }
        }

        debug!("Creating topic {}", desired.name);
        let topic = ctx.client().create_topic(payload, avatar.as_ref()).await?;
        Ok(topic.id.to_string())
    }

    async fn read(&self, ctx: &ProviderContext, id: &str, prior: &TopicState) -> Result<TopicState> {
        let topic_id = topic_id(id)?;
        debug!("Reading topic {}", topic_id);
        let topic = ctx.client().get_topic(topic_id).await?;
        Ok(TopicState::from_entity(&topic, prior))
    }

    async fn update(
        &self,
        ctx: &ProviderContext,
        id: &str,
        desired: &mut TopicState,
        changes: &ChangeSet,
    ) -> Result<()> {
        let topic_id = topic_id(id)?;
        let gate = CapabilityGate::new(ctx.client());
        ensure_title_support(&gate, desired).await?;

        let mut payload = desired.to_payload(Some(changes));
        let change = avatar_for_update(
            desired.avatar.as_deref(),
            desired.avatar_hash.as_deref(),
            changes,
        )
        .await?;

        let avatar = match change {
            AvatarChange::Unchanged => None,
            AvatarChange::Upload(avatar) => {
                let hash_given = changes.contains("avatar_hash")
                    && desired.avatar_hash.clone().none_if_empty().is_some();
                if !hash_given {
                    desired.avatar_hash = Some(avatar.sha256());
                }
                Some(avatar)
            }
            AvatarChange::Remove => {
                payload.insert("avatar".to_string(), JsonValue::String(String::new()));
                desired.avatar_hash = None;
                None
            }
        };

        if payload.is_empty() && avatar.is_none() {
            debug!("Nothing to update for topic {}", topic_id);
            return Ok(());
        }

        debug!("Updating topic {}", topic_id);
        ctx.client()
            .update_topic(topic_id, payload, avatar.as_ref())
            .await?;
        Ok(())
    }

    async fn delete(&self, ctx: &ProviderContext, id: &str, state: &TopicState) -> Result<()> {
        let topic_id = topic_id(id)?;
        let soft_destroy = state.soft_destroy.unwrap_or(false);
        let gate = CapabilityGate::new(ctx.client());

        if gate.supports(DELETE_MIN_VERSION).await? {
            if soft_destroy {
                warn!(
                    "soft_destroy is ignored for topic {}, GitLab {} supports deletion",
                    topic_id,
                    gate.remote_version().await?
                );
            }
            debug!("Deleting topic {}", topic_id);
            return ctx.client().delete_topic(topic_id).await;
        }

        if !soft_destroy {
            return Err(Error::unsupported(
                "topic deletion (set `soft_destroy = true` to empty the topic instead)",
                DELETE_MIN_VERSION,
                gate.remote_version().await?,
            ));
        }

        warn!(
            "Not deleting topic {}, emptying its description instead",
            topic_id
        );
        let mut payload = JsonObject::new();
        payload.insert("description".to_string(), JsonValue::String(String::new()));
        ctx.client().update_topic(topic_id, payload, None).await?;
        Ok(())
    }

    fn import_seed(&self, raw_id: &str) -> Result<TopicState> {
        topic_id(raw_id)?;
        Ok(TopicState::default())
    }
}
