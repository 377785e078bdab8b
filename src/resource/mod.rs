//! Resource reconciliation
//!
//! Every resource type implements [`Reconciler`] over a typed state record.
//! [`TypedResource`] adapts it to the JSON-facing [`Resource`] contract the
//! host drives, and enforces the sequence every type shares:
//!
//! - **Create**: validate desired state, create, then read back
//! - **Read**: a remote not-found becomes [`ReadResult::Absent`], never an error
//! - **Update**: send only what changed since the prior state, then read back
//! - **Delete**: remove the remote entity
//! - **Import**: validate the raw identity and perform exactly one read
//!
//! Reconcilers hold no state of their own; everything an operation needs
//! arrives through [`ProviderContext`](crate::config::ProviderContext), so
//! concurrent operations on distinct resources never interfere.

mod reconciler;
mod registry;
mod types;

pub mod project_membership;
pub mod service_jira;
pub mod topic;

pub use project_membership::{ProjectMembershipResource, ProjectMembershipState};
pub use reconciler::{Reconciler, Resource, TypedResource};
pub use registry::{Constructor, ResourceRegistry};
pub use service_jira::{JiraServiceState, ServiceJiraResource};
pub use topic::{TopicResource, TopicState};
pub use types::{Operation, ReadResult, ResourceState};
