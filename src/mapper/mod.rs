//! Attribute mapping between declarative state and GitLab payloads
//!
//! Outbound, a typed resource state becomes a JSON request body following
//! the per-kind rules: required and set sensitive values always go out,
//! optional values go out when set (create) or when changed (update),
//! computed values never do. Inbound, a remote entity overwrites required,
//! optional and computed attributes, while values the remote never echoes
//! (secrets, local file paths) are carried over from the prior state.
//!
//! Nothing in this module performs I/O.

mod changes;
mod payload;

pub use changes::ChangeSet;
pub use payload::{to_multipart, PayloadBuilder, PayloadMode};

use crate::types::JsonObject;

/// Conversion between one resource's typed state and its remote shape
pub trait AttributeMapper: Sized {
    /// The remote entity as returned by the API client
    type Entity;

    /// Build the outbound payload; `changes` is `None` for creation
    fn to_payload(&self, changes: Option<&ChangeSet>) -> JsonObject;

    /// Build state from a remote entity, keeping what the remote cannot report from `prior`
    fn from_entity(entity: &Self::Entity, prior: &Self) -> Self;
}

#[cfg(test)]
mod tests;
