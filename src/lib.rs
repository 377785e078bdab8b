// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # GitLab Provider
//!
//! Declarative resource reconcilers for the GitLab REST API. A host (an
//! infrastructure-as-code engine, or the bundled CLI) hands over desired
//! and prior state; the provider creates, reads, updates, deletes and
//! imports the matching GitLab objects.
//!
//! ## Features
//!
//! - **Resources**: `gitlab_topic`, `gitlab_project_membership`, `gitlab_service_jira`
//! - **Version gating**: Attributes are checked against the remote GitLab release
//! - **Minimal updates**: Only attributes that changed are sent
//! - **Drift handling**: A vanished remote object reads as absent, not as an error
//! - **Resilient transport**: Retries, backoff and rate limiting below the reconcilers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gitlab_provider::{ProviderConfig, ProviderContext, ResourceRegistry, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ProviderConfig::from_file("provider.yaml")?.with_env_overrides();
//!     let ctx = ProviderContext::connect(config).await?;
//!
//!     let topics = ResourceRegistry::builtin().get("gitlab_topic")?;
//!     let desired = serde_json::json!({ "name": "rust", "title": "Rust" });
//!     let state = topics.create(&ctx, &desired).await?;
//!
//!     println!("created topic {}", state.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Resource Interface                         │
//! │  create(desired)  read(id, prior)  update(id, prior, desired)   │
//! │  delete(id, state)  import(raw_id)                              │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬────────────┬────────────┐
//! │  Schema  │  Mapper   │  Capability   │  Identity  │    API     │
//! ├──────────┼───────────┼───────────────┼────────────┼────────────┤
//! │ Kinds    │ Payloads  │ Version gate  │ Composite  │ Topics     │
//! │ Defaults │ Changes   │ Introduced-   │ ids        │ Members    │
//! │ Validate │ Read-back │ required      │            │ Jira       │
//! └──────────┴───────────┴───────────────┴────────────┴────────────┘
//!                                │
//!                    HTTP: auth, retry, rate limit
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the provider
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Typed GitLab REST API client
pub mod api;

/// Composite identity encoding
pub mod identity;

/// Remote version gating
pub mod capability;

/// Attribute schemas and boundary validation
pub mod schema;

/// Payload construction and change detection
pub mod mapper;

/// Avatar images read from disk
pub mod avatar;

/// Provider configuration and operation context
pub mod config;

/// Resource reconcilers and the registry
pub mod resource;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{ProviderConfig, ProviderContext};
pub use resource::{ReadResult, Resource, ResourceRegistry, ResourceState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
