//! Capability gate implementation

use super::version::parse_version;
use crate::error::{Error, Result};
use async_trait::async_trait;
use semver::Version;
use tokio::sync::OnceCell;
use tracing::debug;

/// Source of the remote GitLab version string
#[async_trait]
pub trait VersionReporter: Send + Sync {
    /// Fetch the remote version, e.g. `15.1.0-ee`
    async fn version(&self) -> Result<String>;
}

/// Check whether the remote instance is at least `min_version`
///
/// The version is fetched on every call.
pub async fn supports_feature(reporter: &dyn VersionReporter, min_version: &str) -> Result<bool> {
    let raw = reporter.version().await?;
    let actual = parse_version(&raw)?;
    let minimum = parse_version(min_version)?;
    debug!("GitLab {} vs required {}", actual, minimum);
    Ok(actual >= minimum)
}

/// Version checks scoped to a single reconciler operation
///
/// The remote version is fetched lazily on first use and reused for the
/// rest of the operation. A new gate must be created for every operation
/// so that upgrades of the remote instance are observed.
pub struct CapabilityGate<'a> {
    reporter: &'a dyn VersionReporter,
    version: OnceCell<(String, Version)>,
}

impl<'a> CapabilityGate<'a> {
    /// Create a gate for one operation
    pub fn new(reporter: &'a dyn VersionReporter) -> Self {
        Self {
            reporter,
            version: OnceCell::new(),
        }
    }

    async fn remote(&self) -> Result<&(String, Version)> {
        self.version
            .get_or_try_init(|| async {
                let raw = self.reporter.version().await?;
                let parsed = parse_version(&raw)?;
                debug!("Remote GitLab version is {}", raw);
                Ok::<_, Error>((raw, parsed))
            })
            .await
    }

    /// The raw remote version string
    pub async fn remote_version(&self) -> Result<String> {
        Ok(self.remote().await?.0.clone())
    }

    /// Whether the remote version is at least `min_version`
    pub async fn supports(&self, min_version: &str) -> Result<bool> {
        let minimum = parse_version(min_version)?;
        Ok(self.remote().await?.1 >= minimum)
    }

    /// Whether the remote version is older than `min_version`
    pub async fn is_older_than(&self, min_version: &str) -> Result<bool> {
        Ok(!self.supports(min_version).await?)
    }

    /// Reject an attribute that was supplied but does not exist before `min_version`
    pub async fn check_supplied(&self, field: &str, supplied: bool, min_version: &str) -> Result<()> {
        if supplied && !self.supports(min_version).await? {
            return Err(Error::unsupported(
                field,
                min_version,
                self.remote_version().await?,
            ));
        }
        Ok(())
    }

    /// Enforce an attribute introduced in `min_version` and mandatory from then on
    ///
    /// Older instances reject the attribute; newer ones require it.
    pub async fn check_introduced_required(
        &self,
        field: &str,
        supplied: bool,
        min_version: &str,
    ) -> Result<()> {
        let supported = self.supports(min_version).await?;
        match (supported, supplied) {
            (true, false) => Err(Error::missing_field(
                field,
                format!(
                    "{field} is a required attribute for GitLab {min_version} and newer, please specify it in the configuration"
                ),
            )),
            (false, true) => Err(Error::unsupported(
                field,
                min_version,
                self.remote_version().await?,
            )),
            _ => Ok(()),
        }
    }
}
