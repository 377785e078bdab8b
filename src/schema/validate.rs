//! Boundary validation of desired state

use super::types::{AttributeKind, ResourceSchema};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

impl ResourceSchema {
    /// Check a desired state against the schema and normalise it
    ///
    /// Computed-only attributes are dropped, declared defaults are filled
    /// in and the result is ready to be deserialized into the resource's
    /// typed state.
    pub fn validate_desired(&self, desired: &JsonValue) -> Result<JsonObject> {
        let input = match desired {
            JsonValue::Object(map) => map.clone(),
            JsonValue::Null => JsonObject::new(),
            other => {
                return Err(Error::invalid_attribute(
                    self.type_name,
                    format!("desired state must be an object, got {other}"),
                ))
            }
        };

        for key in input.keys() {
            if self.get(key).is_none() {
                return Err(Error::invalid_attribute(
                    key.as_str(),
                    format!("not an attribute of {}", self.type_name),
                ));
            }
        }

        let mut output = JsonObject::new();
        for attribute in &self.attributes {
            let value = input.get(attribute.name).cloned().unwrap_or(JsonValue::Null);

            if !attribute.value_type.accepts(&value) {
                return Err(Error::invalid_attribute(
                    attribute.name,
                    format!("expected {:?}, got {value}", attribute.value_type),
                ));
            }

            match attribute.kind {
                AttributeKind::Computed => continue,
                AttributeKind::Required if value.is_null() => {
                    return Err(Error::missing_field(
                        attribute.name,
                        format!("{} requires this attribute", self.type_name),
                    ));
                }
                _ => {}
            }

            let value = match (&value, &attribute.default) {
                (JsonValue::Null, Some(default)) => default.clone(),
                _ => value,
            };

            if !value.is_null() {
                output.insert(attribute.name.to_string(), value);
            }
        }

        Ok(output)
    }
}
