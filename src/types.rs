//! Common types used throughout the GitLab provider
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Attribute Value Type (for schemas)
// ============================================================================

/// Value type of a declared resource attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Boolean,
}

impl ValueType {
    /// Whether a JSON value is acceptable for this type (null always is)
    pub fn accepts(self, value: &JsonValue) -> bool {
        match (self, value) {
            (_, JsonValue::Null) => true,
            (ValueType::String, JsonValue::String(_)) => true,
            (ValueType::Integer, JsonValue::Number(n)) => n.is_i64(),
            (ValueType::Boolean, JsonValue::Bool(_)) => true,
            _ => false,
        }
    }
}

// ============================================================================
// Access Level
// ============================================================================

/// GitLab membership access level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    NoOne,
    Minimal,
    Guest,
    Reporter,
    Developer,
    Maintainer,
    Owner,
}

impl AccessLevel {
    /// Names accepted for project memberships
    pub const PROJECT_NAMES: &'static [&'static str] =
        &["guest", "reporter", "developer", "maintainer", "owner"];

    /// Numeric value used by the GitLab API
    pub fn value(self) -> u32 {
        match self {
            AccessLevel::NoOne => 0,
            AccessLevel::Minimal => 5,
            AccessLevel::Guest => 10,
            AccessLevel::Reporter => 20,
            AccessLevel::Developer => 30,
            AccessLevel::Maintainer => 40,
            AccessLevel::Owner => 50,
        }
    }

    /// Map a numeric API value back to a level
    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            0 => Some(AccessLevel::NoOne),
            5 => Some(AccessLevel::Minimal),
            10 => Some(AccessLevel::Guest),
            20 => Some(AccessLevel::Reporter),
            30 => Some(AccessLevel::Developer),
            40 => Some(AccessLevel::Maintainer),
            50 => Some(AccessLevel::Owner),
            _ => None,
        }
    }

    /// Lowercase name as used in configuration
    pub fn name(self) -> &'static str {
        match self {
            AccessLevel::NoOne => "no one",
            AccessLevel::Minimal => "minimal",
            AccessLevel::Guest => "guest",
            AccessLevel::Reporter => "reporter",
            AccessLevel::Developer => "developer",
            AccessLevel::Maintainer => "maintainer",
            AccessLevel::Owner => "owner",
        }
    }
}

impl FromStr for AccessLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Names are case-sensitive; state always holds the canonical spelling
        match s {
            "no one" => Ok(AccessLevel::NoOne),
            "minimal" => Ok(AccessLevel::Minimal),
            "guest" => Ok(AccessLevel::Guest),
            "reporter" => Ok(AccessLevel::Reporter),
            "developer" => Ok(AccessLevel::Developer),
            "maintainer" => Ok(AccessLevel::Maintainer),
            "owner" => Ok(AccessLevel::Owner),
            other => Err(Error::invalid_attribute(
                "access_level",
                format!(
                    "'{other}' is not one of {}",
                    AccessLevel::PROJECT_NAMES.join(", ")
                ),
            )),
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_accepts() {
        assert!(ValueType::String.accepts(&serde_json::json!("x")));
        assert!(ValueType::Integer.accepts(&serde_json::json!(7)));
        assert!(ValueType::Boolean.accepts(&serde_json::json!(false)));
        assert!(ValueType::Integer.accepts(&JsonValue::Null));

        assert!(!ValueType::Integer.accepts(&serde_json::json!("7")));
        assert!(!ValueType::Integer.accepts(&serde_json::json!(1.5)));
        assert!(ValueType::Integer.accepts(&serde_json::json!(i64::MAX)));
        assert!(!ValueType::Integer.accepts(&serde_json::json!(u64::MAX)));
        assert!(!ValueType::String.accepts(&serde_json::json!(true)));
    }

    #[test]
    fn test_access_level_names() {
        assert_eq!("developer".parse::<AccessLevel>().unwrap(), AccessLevel::Developer);
        assert_eq!("maintainer".parse::<AccessLevel>().unwrap(), AccessLevel::Maintainer);
        assert!("Maintainer".parse::<AccessLevel>().is_err());
        assert!("master".parse::<AccessLevel>().is_err());
        assert!("admin".parse::<AccessLevel>().is_err());
    }

    #[test]
    fn test_access_level_values() {
        for name in AccessLevel::PROJECT_NAMES {
            let level: AccessLevel = name.parse().unwrap();
            assert_eq!(AccessLevel::from_value(level.value()), Some(level));
            assert_eq!(level.name(), *name);
        }
        assert_eq!(AccessLevel::from_value(33), None);
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!(String::new().none_if_empty(), None);
    }
}
