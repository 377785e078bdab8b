//! Authenticator implementation
//!
//! Handles applying credentials to outgoing requests.

use super::types::{AuthConfig, TokenType};
use reqwest::RequestBuilder;

/// Header used for personal/project access tokens
const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Header used for CI job tokens
const JOB_TOKEN_HEADER: &str = "JOB-TOKEN";

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Whether any credentials are configured
    pub fn is_authenticated(&self) -> bool {
        !matches!(self.config, AuthConfig::None)
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,
            AuthConfig::Token { token_type, token } => match token_type {
                TokenType::Private => req.header(PRIVATE_TOKEN_HEADER, token.as_str()),
                TokenType::Oauth => req.bearer_auth(token),
                TokenType::Job => req.header(JOB_TOKEN_HEADER, token.as_str()),
            },
        }
    }
}
