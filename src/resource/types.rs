//! Values exchanged between reconcilers and the host

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

// ============================================================================
// Resource State
// ============================================================================

/// Identity and attributes of one managed resource, as the host persists them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Resource Identity; the only handle the host must keep between calls
    pub id: String,

    /// Attribute values keyed by schema name
    pub attributes: JsonValue,
}

impl ResourceState {
    /// Create a resource state
    pub fn new(id: impl Into<String>, attributes: JsonValue) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    /// Look up one attribute
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.attributes.get(name)
    }
}

// ============================================================================
// Read Result
// ============================================================================

/// Outcome of a read
///
/// `Absent` means the remote entity is gone: the host clears the stored
/// identity and plans a re-creation. It is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadResult {
    /// The entity exists
    Present(ResourceState),
    /// The entity no longer exists remotely
    Absent,
}

impl ReadResult {
    /// Whether the entity was found
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The state, if the entity was found
    pub fn into_state(self) -> Option<ResourceState> {
        match self {
            Self::Present(state) => Some(state),
            Self::Absent => None,
        }
    }
}

// ============================================================================
// Operation
// ============================================================================

/// Reconciler operation names, used to annotate errors and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl Operation {
    /// Lowercase verb
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Import => "import",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
