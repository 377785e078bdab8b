//! Auth configuration types

use serde::{Deserialize, Serialize};

/// Kind of GitLab token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Personal, project or group access token (`PRIVATE-TOKEN` header)
    #[default]
    Private,
    /// OAuth2 access token (`Authorization: Bearer`)
    Oauth,
    /// CI job token (`JOB-TOKEN` header)
    Job,
}

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication (public endpoints only)
    #[default]
    None,

    /// Token authentication
    Token {
        /// How the token is presented
        token_type: TokenType,
        /// The token value
        token: String,
    },
}

impl AuthConfig {
    /// Create a token auth config, or `None` for an empty token
    pub fn token(token_type: TokenType, token: impl Into<String>) -> Self {
        let token = token.into();
        if token.is_empty() {
            AuthConfig::None
        } else {
            AuthConfig::Token { token_type, token }
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthConfig::None => f.write_str("None"),
            AuthConfig::Token { token_type, .. } => f
                .debug_struct("Token")
                .field("token_type", token_type)
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}
