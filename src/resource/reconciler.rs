//! The reconciliation contract and its typed-to-JSON adapter

use super::types::{Operation, ReadResult, ResourceState};
use crate::config::ProviderContext;
use crate::error::{Error, Result};
use crate::mapper::ChangeSet;
use crate::schema::{AttributeKind, ResourceSchema};
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

// ============================================================================
// Resource (host-facing, object safe)
// ============================================================================

/// A resource type as the host sees it
///
/// Desired and prior state travel as JSON objects keyed by attribute name.
/// Every error returned here is annotated with the operation and identity
/// it escaped from, except that a read of a vanished entity yields
/// [`ReadResult::Absent`] instead of an error.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Resource type name, e.g. `gitlab_topic`
    fn type_name(&self) -> &'static str;

    /// Attribute schema
    fn schema(&self) -> &ResourceSchema;

    /// Whether `import` is available
    fn importable(&self) -> bool;

    /// Create the remote entity, then read it back
    async fn create(&self, ctx: &ProviderContext, desired: &JsonValue) -> Result<ResourceState>;

    /// Read the remote entity; `prior` supplies values the remote never reports
    async fn read(&self, ctx: &ProviderContext, id: &str, prior: &JsonValue) -> Result<ReadResult>;

    /// Send the attributes that changed since `prior`, then read the entity back
    async fn update(
        &self,
        ctx: &ProviderContext,
        id: &str,
        prior: &JsonValue,
        desired: &JsonValue,
    ) -> Result<ResourceState>;

    /// Delete the remote entity
    async fn delete(&self, ctx: &ProviderContext, id: &str, state: &JsonValue) -> Result<()>;

    /// Adopt an existing remote entity by identity
    async fn import(&self, ctx: &ProviderContext, raw_id: &str) -> Result<ResourceState>;
}

// ============================================================================
// Reconciler (per resource type, strongly typed)
// ============================================================================

/// Per-resource reconciliation logic over a typed state record
///
/// Implementations receive state that already passed schema validation.
/// They never retry and never map not-found themselves; [`TypedResource`]
/// handles both the refresh-after-write sequence and the absent signal.
#[async_trait]
pub trait Reconciler: Send + Sync + 'static {
    /// Typed attribute record
    type State: Serialize + DeserializeOwned + Default + Clone + Send + Sync;

    /// Resource type name
    const TYPE_NAME: &'static str;

    /// Whether existing entities can be imported
    const IMPORTABLE: bool = true;

    /// Attribute schema
    fn schema() -> ResourceSchema;

    /// Create the entity and return its identity
    ///
    /// Locally computed attributes (such as file hashes) may be recorded in
    /// `desired`; it becomes the prior state of the following read.
    async fn create(&self, ctx: &ProviderContext, desired: &mut Self::State) -> Result<String>;

    /// Fetch the entity; not-found surfaces as an error for which
    /// [`Error::is_not_found`] holds
    async fn read(&self, ctx: &ProviderContext, id: &str, prior: &Self::State)
        -> Result<Self::State>;

    /// Apply the changed attributes
    async fn update(
        &self,
        ctx: &ProviderContext,
        id: &str,
        desired: &mut Self::State,
        changes: &ChangeSet,
    ) -> Result<()>;

    /// Delete the entity
    async fn delete(&self, ctx: &ProviderContext, id: &str, state: &Self::State) -> Result<()>;

    /// Validate an imported identity and seed the state the import read starts from
    fn import_seed(&self, _raw_id: &str) -> Result<Self::State> {
        Ok(Self::State::default())
    }
}

// ============================================================================
// Typed Resource (adapter)
// ============================================================================

/// Adapts a [`Reconciler`] to the JSON-facing [`Resource`] contract
pub struct TypedResource<R: Reconciler> {
    reconciler: R,
    schema: ResourceSchema,
}

impl<R: Reconciler> TypedResource<R> {
    /// Wrap a reconciler
    pub fn new(reconciler: R) -> Self {
        Self {
            reconciler,
            schema: R::schema(),
        }
    }

    /// The wrapped reconciler
    pub fn reconciler(&self) -> &R {
        &self.reconciler
    }

    fn desired_state(&self, desired: JsonObject) -> Result<R::State> {
        Ok(serde_json::from_value(JsonValue::Object(desired))?)
    }

    async fn refresh(
        &self,
        ctx: &ProviderContext,
        id: &str,
        prior: &R::State,
    ) -> Result<ResourceState> {
        let state = self.reconciler.read(ctx, id, prior).await?;
        Ok(ResourceState::new(id, serde_json::to_value(&state)?))
    }

    async fn create_inner(&self, ctx: &ProviderContext, desired: &JsonValue) -> Result<ResourceState> {
        let validated = self.schema.validate_desired(desired)?;
        let mut state = self.desired_state(validated)?;

        let id = self.reconciler.create(ctx, &mut state).await?;
        debug!("Created {} '{}'", R::TYPE_NAME, id);

        self.refresh(ctx, &id, &state)
            .await
            .map_err(|e| e.in_operation(Operation::Create.as_str(), R::TYPE_NAME, id.as_str()))
    }

    async fn update_inner(
        &self,
        ctx: &ProviderContext,
        id: &str,
        prior: &JsonValue,
        desired: &JsonValue,
    ) -> Result<ResourceState> {
        let validated = self.schema.validate_desired(desired)?;
        let changes = ChangeSet::between(&self.schema, prior, &validated);

        if let Some(name) = self
            .schema
            .force_new_attributes()
            .into_iter()
            .find(|name| changes.contains(name))
        {
            return Err(Error::invalid_attribute(
                name,
                "cannot be changed in place, the resource must be replaced",
            ));
        }

        debug!(
            "Updating {} '{}', changed: {:?}",
            R::TYPE_NAME,
            id,
            changes.iter().collect::<Vec<_>>()
        );

        let merged = carry_unsent(&self.schema, prior, validated);
        let mut state = self.desired_state(merged)?;

        self.reconciler.update(ctx, id, &mut state, &changes).await?;
        self.refresh(ctx, id, &state).await
    }
}

/// Keep server-assigned values the caller did not restate
fn carry_unsent(schema: &ResourceSchema, prior: &JsonValue, mut desired: JsonObject) -> JsonObject {
    for attribute in &schema.attributes {
        if !matches!(
            attribute.kind,
            AttributeKind::Computed | AttributeKind::OptionalComputed
        ) || desired.contains_key(attribute.name)
        {
            continue;
        }
        if let Some(value) = prior.get(attribute.name).filter(|v| !v.is_null()) {
            desired.insert(attribute.name.to_string(), value.clone());
        }
    }
    desired
}

/// Deserialize a host-supplied state; `null` is the empty state
fn typed_state<S: DeserializeOwned + Default>(value: &JsonValue) -> Result<S> {
    if value.is_null() {
        return Ok(S::default());
    }
    Ok(serde_json::from_value(value.clone())?)
}

#[async_trait]
impl<R: Reconciler> Resource for TypedResource<R> {
    fn type_name(&self) -> &'static str {
        R::TYPE_NAME
    }

    fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    fn importable(&self) -> bool {
        R::IMPORTABLE
    }

    async fn create(&self, ctx: &ProviderContext, desired: &JsonValue) -> Result<ResourceState> {
        self.create_inner(ctx, desired)
            .await
            .map_err(|e| match e {
                annotated @ Error::Operation { .. } => annotated,
                e => e.in_operation(Operation::Create.as_str(), R::TYPE_NAME, "(new)"),
            })
    }

    async fn read(&self, ctx: &ProviderContext, id: &str, prior: &JsonValue) -> Result<ReadResult> {
        let annotate = |e: Error| e.in_operation(Operation::Read.as_str(), R::TYPE_NAME, id);
        let prior: R::State = typed_state(prior).map_err(annotate)?;

        match self.reconciler.read(ctx, id, &prior).await {
            Ok(state) => {
                let attributes = serde_json::to_value(&state).map_err(|e| annotate(e.into()))?;
                Ok(ReadResult::Present(ResourceState::new(id, attributes)))
            }
            Err(e) if e.is_not_found() => {
                debug!("{} '{}' not found, removing from state", R::TYPE_NAME, id);
                Ok(ReadResult::Absent)
            }
            Err(e) => Err(annotate(e)),
        }
    }

    async fn update(
        &self,
        ctx: &ProviderContext,
        id: &str,
        prior: &JsonValue,
        desired: &JsonValue,
    ) -> Result<ResourceState> {
        self.update_inner(ctx, id, prior, desired)
            .await
            .map_err(|e| e.in_operation(Operation::Update.as_str(), R::TYPE_NAME, id))
    }

    async fn delete(&self, ctx: &ProviderContext, id: &str, state: &JsonValue) -> Result<()> {
        let annotate = |e: Error| e.in_operation(Operation::Delete.as_str(), R::TYPE_NAME, id);
        let state: R::State = typed_state(state).map_err(annotate)?;

        self.reconciler
            .delete(ctx, id, &state)
            .await
            .map_err(annotate)?;
        debug!("Deleted {} '{}'", R::TYPE_NAME, id);
        Ok(())
    }

    async fn import(&self, ctx: &ProviderContext, raw_id: &str) -> Result<ResourceState> {
        if !R::IMPORTABLE {
            return Err(Error::ImportNotSupported {
                resource_type: R::TYPE_NAME.to_string(),
            });
        }

        let annotate = |e: Error| e.in_operation(Operation::Import.as_str(), R::TYPE_NAME, raw_id);
        let seed = self.reconciler.import_seed(raw_id).map_err(annotate)?;
        self.refresh(ctx, raw_id, &seed).await.map_err(annotate)
    }
}

impl<R: Reconciler + std::fmt::Debug> std::fmt::Debug for TypedResource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedResource")
            .field("type_name", &R::TYPE_NAME)
            .field("reconciler", &self.reconciler)
            .finish()
    }
}
