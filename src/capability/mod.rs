//! Remote capability gating
//!
//! Some attributes only exist on newer GitLab releases, and some become
//! mandatory once a release introduces them. Reconcilers ask a
//! [`CapabilityGate`] whether the remote instance is new enough before
//! they build a request.
//!
//! # Overview
//!
//! - [`parse_version`] / [`version_at_least`] - lenient GitLab version parsing and ordering
//! - [`VersionReporter`] - anything that can report the remote version
//! - [`supports_feature`] - one-shot check that fetches the version on every call
//! - [`CapabilityGate`] - per-operation check that fetches the version at most once

mod gate;
mod version;

pub use gate::{supports_feature, CapabilityGate, VersionReporter};
pub use version::{parse_version, version_at_least};
