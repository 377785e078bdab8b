//! GitLab REST API client
//!
//! Thin typed wrappers over [`HttpClient`](crate::http::HttpClient) for the
//! endpoints the resources use. Paths are relative to the configured
//! `/api/v4` base URL; project ids are percent-encoded so that
//! `namespace/project` paths work as ids.

mod client;
mod types;

pub use client::{encode_project, GitlabClient};
pub use types::{
    JiraProperties, JiraService, Project, ProjectMember, Topic, User, VersionInfo,
};

#[cfg(test)]
mod tests;
