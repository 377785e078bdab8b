//! Schema types

use crate::types::{JsonValue, ValueType};
use serde::Serialize;

/// How an attribute participates in reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Must be supplied by the caller
    Required,
    /// May be supplied by the caller
    Optional,
    /// May be supplied; the remote value is used when it is not
    OptionalComputed,
    /// Assigned by the remote system, never sent
    Computed,
}

impl AttributeKind {
    /// Whether callers may set this attribute
    pub fn is_settable(self) -> bool {
        !matches!(self, AttributeKind::Computed)
    }
}

/// A single attribute declaration
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    /// Attribute name as it appears in state
    pub name: &'static str,
    /// Participation kind
    pub kind: AttributeKind,
    /// Value type
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Human-readable description
    pub description: &'static str,
    /// Secret values are sent but never read back
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    /// Changing the value replaces the remote object
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_new: bool,
    /// Deprecation notice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<&'static str>,
    /// Default applied when the caller omits the attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
}

impl Attribute {
    fn new(name: &'static str, kind: AttributeKind, value_type: ValueType) -> Self {
        Self {
            name,
            kind,
            value_type,
            description: "",
            sensitive: false,
            force_new: false,
            deprecated: None,
            default: None,
        }
    }

    /// A required attribute
    pub fn required(name: &'static str, value_type: ValueType) -> Self {
        Self::new(name, AttributeKind::Required, value_type)
    }

    /// An optional attribute
    pub fn optional(name: &'static str, value_type: ValueType) -> Self {
        Self::new(name, AttributeKind::Optional, value_type)
    }

    /// An optional attribute whose remote value fills in when omitted
    pub fn optional_computed(name: &'static str, value_type: ValueType) -> Self {
        Self::new(name, AttributeKind::OptionalComputed, value_type)
    }

    /// A server-assigned attribute
    pub fn computed(name: &'static str, value_type: ValueType) -> Self {
        Self::new(name, AttributeKind::Computed, value_type)
    }

    #[must_use]
    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    #[must_use]
    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    #[must_use]
    pub fn deprecated(mut self, message: &'static str) -> Self {
        self.deprecated = Some(message);
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: JsonValue) -> Self {
        self.default = Some(value);
        self
    }
}

/// Declared attributes of one resource type
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSchema {
    /// Resource type name, e.g. `gitlab_topic`
    pub type_name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Attribute declarations in display order
    pub attributes: Vec<Attribute>,
}

impl ResourceSchema {
    /// Create an empty schema
    pub fn new(type_name: &'static str, description: &'static str) -> Self {
        Self {
            type_name,
            description,
            attributes: Vec::new(),
        }
    }

    /// Add an attribute
    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add several attributes
    #[must_use]
    pub fn attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Look up an attribute by name
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Names of attributes that replace the remote object when changed
    pub fn force_new_attributes(&self) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.force_new)
            .map(|a| a.name)
            .collect()
    }

    /// Names of secret attributes
    pub fn sensitive_attributes(&self) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|a| a.sensitive)
            .map(|a| a.name)
            .collect()
    }
}
