//! CLI module
//!
//! A host harness that drives the reconcilers from the command line.
//!
//! # Commands
//!
//! - `resources` - List supported resource types
//! - `schema` - Show a resource type's attributes
//! - `version` - Show the remote GitLab version
//! - `create` / `read` / `update` / `delete` / `import` - Run one reconciler operation

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, TargetArgs, TypeArg};
pub use runner::{parse_document, Runner};
