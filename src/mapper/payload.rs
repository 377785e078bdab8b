//! Outbound payload construction

use super::changes::ChangeSet;
use crate::http::MultipartBody;
use crate::types::{JsonObject, JsonValue};

/// Whether a payload is being built for creation or for an update
#[derive(Debug, Clone, Copy)]
pub enum PayloadMode<'a> {
    /// Every set attribute is sent
    Create,
    /// Only changed attributes are sent
    Update(&'a ChangeSet),
}

/// Builds a JSON request body according to attribute kinds
#[derive(Debug)]
pub struct PayloadBuilder<'a> {
    mode: PayloadMode<'a>,
    fields: JsonObject,
}

impl<'a> PayloadBuilder<'a> {
    /// Start a payload; `changes` is `None` for creation
    pub fn new(changes: Option<&'a ChangeSet>) -> Self {
        let mode = match changes {
            Some(changes) => PayloadMode::Update(changes),
            None => PayloadMode::Create,
        };
        Self {
            mode,
            fields: JsonObject::new(),
        }
    }

    fn wants(&self, name: &str) -> bool {
        match self.mode {
            PayloadMode::Create => true,
            PayloadMode::Update(changes) => changes.contains(name),
        }
    }

    fn insert<T: Into<JsonValue> + Clone>(&mut self, name: &str, value: &T) {
        self.fields.insert(name.to_string(), value.clone().into());
    }

    /// A required attribute, sent on create and whenever it changed
    #[must_use]
    pub fn required<T: Into<JsonValue> + Clone>(mut self, name: &str, value: &T) -> Self {
        if self.wants(name) {
            self.insert(name, value);
        }
        self
    }

    /// A required attribute sent on every write, changed or not
    #[must_use]
    pub fn always<T: Into<JsonValue> + Clone>(mut self, name: &str, value: &T) -> Self {
        self.insert(name, value);
        self
    }

    /// An optional attribute: sent when set (create) or changed (update)
    ///
    /// An optional attribute removed in an update cannot be expressed for
    /// non-string values and is skipped.
    #[must_use]
    pub fn optional<T: Into<JsonValue> + Clone>(mut self, name: &str, value: &Option<T>) -> Self {
        if let Some(value) = value {
            if self.wants(name) {
                self.insert(name, value);
            }
        }
        self
    }

    /// An optional string: removal in an update is sent as the empty string
    #[must_use]
    pub fn optional_string(mut self, name: &str, value: &Option<String>) -> Self {
        match (self.mode, value) {
            (PayloadMode::Create, Some(v)) if !v.is_empty() => self.insert(name, v),
            (PayloadMode::Update(changes), v) if changes.contains(name) => {
                self.insert(name, &v.clone().unwrap_or_default());
            }
            _ => {}
        }
        self
    }

    /// A sensitive attribute: sent whenever it is set
    #[must_use]
    pub fn sensitive(mut self, name: &str, value: &Option<String>) -> Self {
        if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
            self.insert(name, value);
        }
        self
    }

    /// Finish as a JSON object
    pub fn build(self) -> JsonObject {
        self.fields
    }

    /// Finish as a JSON value
    pub fn build_value(self) -> JsonValue {
        JsonValue::Object(self.fields)
    }
}

/// Convert a flat JSON payload into multipart text fields
pub fn to_multipart(payload: &JsonObject) -> MultipartBody {
    payload
        .iter()
        .fold(MultipartBody::new(), |body, (name, value)| {
            let text = match value {
                JsonValue::String(s) => s.clone(),
                JsonValue::Null => String::new(),
                other => other.to_string(),
            };
            body.text(name.as_str(), text)
        })
}
