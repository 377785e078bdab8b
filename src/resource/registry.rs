//! Explicit mapping from resource type name to constructor

use super::project_membership::ProjectMembershipResource;
use super::reconciler::{Reconciler, Resource, TypedResource};
use super::service_jira::ServiceJiraResource;
use super::topic::TopicResource;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Builds a fresh handler for one resource type
pub type Constructor = fn() -> Box<dyn Resource>;

/// Resource types known to the provider
///
/// Built once at startup and passed by reference; nothing registers itself.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    constructors: BTreeMap<&'static str, Constructor>,
}

fn typed<R: Reconciler + Default>() -> Box<dyn Resource> {
    Box::new(TypedResource::new(R::default()))
}

impl ResourceRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The resources shipped with the provider
    pub fn builtin() -> Self {
        Self::new()
            .with(TopicResource::TYPE_NAME, typed::<TopicResource>)
            .with(ProjectMembershipResource::TYPE_NAME, typed::<ProjectMembershipResource>)
            .with(ServiceJiraResource::TYPE_NAME, typed::<ServiceJiraResource>)
    }

    /// Add (or replace) a resource type
    #[must_use]
    pub fn with(mut self, type_name: &'static str, constructor: Constructor) -> Self {
        self.constructors.insert(type_name, constructor);
        self
    }

    /// Instantiate the handler for a resource type
    pub fn get(&self, type_name: &str) -> Result<Box<dyn Resource>> {
        self.constructors
            .get(type_name)
            .map(|construct| construct())
            .ok_or_else(|| Error::UnknownResourceType {
                resource_type: type_name.to_string(),
            })
    }

    /// Whether the resource type is known
    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Known resource type names in sorted order
    pub fn type_names(&self) -> Vec<&'static str> {
        self.constructors.keys().copied().collect()
    }
}
