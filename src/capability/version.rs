//! GitLab version strings
//!
//! GitLab reports versions such as `15.1.0-ee` or `14.9.2-pre`; feature
//! minimums are written as `14.9`. Both are normalised to a full
//! `major.minor.patch` semver version with any suffix dropped.

use crate::error::{Error, Result};
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:[-+].*)?$").expect("valid version regex")
});

/// Parse a GitLab version string, ignoring pre-release and build suffixes
pub fn parse_version(raw: &str) -> Result<Version> {
    let invalid = || Error::InvalidVersion {
        version: raw.to_string(),
    };

    let caps = VERSION_PATTERN.captures(raw.trim()).ok_or_else(invalid)?;
    let component = |index: usize| -> Result<u64> {
        match caps.get(index) {
            Some(m) => m.as_str().parse::<u64>().map_err(|_| invalid()),
            None => Ok(0),
        }
    };

    Ok(Version::new(component(1)?, component(2)?, component(3)?))
}

/// Whether `actual` is at least `minimum` (major, then minor, then patch)
pub fn version_at_least(actual: &str, minimum: &str) -> Result<bool> {
    Ok(parse_version(actual)? >= parse_version(minimum)?)
}
