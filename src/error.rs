//! Error types for the GitLab provider
//!
//! This module defines the error hierarchy for the entire provider.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the GitLab provider
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Identifier Errors
    // ============================================================================
    #[error("Malformed identifier '{id}': expected {expected} parts, found {found}")]
    MalformedIdentifier {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid identifier component '{component}' = '{value}': {message}")]
    InvalidIdentifierComponent {
        component: String,
        value: String,
        message: String,
    },

    // ============================================================================
    // Capability Errors
    // ============================================================================
    #[error("{feature} is not supported by GitLab {actual_version}, at least GitLab {min_version} is required")]
    UnsupportedFeature {
        feature: String,
        min_version: String,
        actual_version: String,
    },

    #[error("Missing required field '{field}': {message}")]
    MissingRequiredField { field: String, message: String },

    #[error("Invalid version string '{version}'")]
    InvalidVersion { version: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid value for attribute '{attribute}': {message}")]
    InvalidAttribute { attribute: String, message: String },

    #[error("Unknown resource type '{resource_type}'")]
    UnknownResourceType { resource_type: String },

    #[error("Resource type '{resource_type}' does not support import")]
    ImportNotSupported { resource_type: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("Remote resource not found: {path}")]
    RemoteNotFound { path: String },

    #[error("GitLab API returned HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Local Resource Errors
    // ============================================================================
    #[error("Unable to open local resource {path}: {source}")]
    LocalResourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============================================================================
    // Reconciler Errors
    // ============================================================================
    #[error("Failed to {operation} {resource_type} '{id}': {source}")]
    Operation {
        operation: &'static str,
        resource_type: String,
        id: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing config field error
    pub fn missing_config_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a missing required field error
    pub fn missing_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported feature error
    pub fn unsupported(
        feature: impl Into<String>,
        min_version: impl Into<String>,
        actual_version: impl Into<String>,
    ) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
            min_version: min_version.into(),
            actual_version: actual_version.into(),
        }
    }

    /// Create an invalid attribute error
    pub fn invalid_attribute(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Create an invalid identifier component error
    pub fn invalid_component(
        component: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidIdentifierComponent {
            component: component.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a remote error from an HTTP status and body
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    /// Annotate this error with the reconciler operation and identity it escaped from
    #[must_use]
    pub fn in_operation(
        self,
        operation: &'static str,
        resource_type: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self::Operation {
            operation,
            resource_type: resource_type.into(),
            id: id.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with operation annotations removed
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Check if this error is the remote "404"-class signal
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.root_cause(),
            Error::RemoteNotFound { .. } | Error::Remote { status: 404, .. }
        )
    }

    /// Check if this error is retryable at the transport layer
    pub fn is_retryable(&self) -> bool {
        match self.root_cause() {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::Remote { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the GitLab provider
pub type Result<T> = std::result::Result<T, Error>;
