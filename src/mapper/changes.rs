//! Change detection between the last-read state and the desired state

use crate::schema::{AttributeKind, ResourceSchema};
use crate::types::{JsonObject, JsonValue};
use std::collections::BTreeSet;

/// Names of the attributes whose desired value differs from the last-read value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changed: BTreeSet<String>,
}

impl ChangeSet {
    /// An empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// A change set with exactly the given names
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            changed: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Compare the prior (last-read) state with the validated desired state
    ///
    /// Computed attributes never count as changed. Optional+computed
    /// attributes the caller left out keep their remote value and are not
    /// changes either.
    pub fn between(schema: &ResourceSchema, prior: &JsonValue, desired: &JsonObject) -> Self {
        let null = JsonValue::Null;
        let mut changed = BTreeSet::new();

        for attribute in &schema.attributes {
            if !attribute.kind.is_settable() {
                continue;
            }

            let new = desired.get(attribute.name).unwrap_or(&null);
            if attribute.kind == AttributeKind::OptionalComputed && new.is_null() {
                continue;
            }

            let old = prior.get(attribute.name).unwrap_or(&null);
            if !same_value(old, new) {
                changed.insert(attribute.name.to_string());
            }
        }

        Self { changed }
    }

    /// Whether the attribute changed
    pub fn contains(&self, name: &str) -> bool {
        self.changed.contains(name)
    }

    /// Whether any of the attributes changed
    pub fn contains_any(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.contains(n))
    }

    /// Whether nothing changed
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    /// Iterate over changed attribute names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.changed.iter().map(String::as_str)
    }
}

// An unset string and an empty string are the same declarative value
fn same_value(old: &JsonValue, new: &JsonValue) -> bool {
    match (old, new) {
        (JsonValue::Null, JsonValue::String(s)) | (JsonValue::String(s), JsonValue::Null) => {
            s.is_empty()
        }
        _ => old == new,
    }
}
