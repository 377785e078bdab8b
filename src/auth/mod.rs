//! Authentication module
//!
//! Supports the three credential kinds GitLab accepts on its REST API:
//! personal/project access tokens, OAuth2 bearer tokens and CI job tokens.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, TokenType};
