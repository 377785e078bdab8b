//! Provider configuration
//!
//! Configuration is read from a YAML or JSON file (or built from defaults)
//! and then overridden by the `GITLAB_TOKEN` and `GITLAB_BASE_URL`
//! environment variables. [`ProviderContext`] turns a validated
//! configuration into the API client every reconciler operation receives.

use crate::api::GitlabClient;
use crate::auth::{AuthConfig, TokenType};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Environment variable overriding the token
pub const TOKEN_ENV: &str = "GITLAB_TOKEN";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "GITLAB_BASE_URL";

const API_SUFFIX: &str = "api/v4";

// ============================================================================
// Provider Config
// ============================================================================

/// Complete provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// GitLab API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access token
    #[serde(default)]
    pub token: String,

    /// How the token is presented to GitLab
    #[serde(default)]
    pub token_type: TokenType,

    /// Verify the credentials with `GET /user` when the provider is configured
    #[serde(default)]
    pub early_auth_check: bool,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    "https://gitlab.com/api/v4/".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            token_type: TokenType::default(),
            early_auth_check: false,
            http: HttpConfig::default(),
        }
    }
}

impl ProviderConfig {
    /// Load configuration from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            Error::LocalResourceUnavailable {
                path: path.display().to_string(),
                source,
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!("Loading provider config from {}", path.display());
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply `GITLAB_TOKEN` / `GITLAB_BASE_URL` from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup; empty values are ignored
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.is_empty()) {
            debug!("Using token from {}", TOKEN_ENV);
            self.token = token;
        }
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            debug!("Using base URL from {}", BASE_URL_ENV);
            self.base_url = base_url;
        }
        self
    }

    /// The base URL with the `/api/v4/` suffix ensured
    pub fn api_url(&self) -> Result<String> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::missing_config_field("base_url"));
        }

        let api_url = if trimmed.ends_with(API_SUFFIX) {
            format!("{trimmed}/")
        } else {
            format!("{trimmed}/{API_SUFFIX}/")
        };

        let parsed = Url::parse(&api_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidConfigValue {
                field: "base_url".to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(api_url)
    }

    /// Check the configuration before any client is built
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::missing_config_field("token"));
        }
        self.api_url()?;
        Ok(())
    }

    /// Build the HTTP client configuration
    pub fn http_client_config(&self) -> Result<HttpClientConfig> {
        let backoff = &self.http.retry_backoff;
        let builder = HttpClientConfig::builder()
            .base_url(self.api_url()?)
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .retry_statuses(self.http.retry_statuses.clone())
            .backoff(
                backoff.backoff_type,
                Duration::from_millis(backoff.initial_ms),
                Duration::from_millis(backoff.max_ms),
            );

        let builder = match &self.http.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit.clone()),
            None => builder.no_rate_limit(),
        };
        Ok(builder.build())
    }

    /// Authentication derived from the token settings
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::token(self.token_type, self.token.clone())
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// HTTP status codes to retry on
    #[serde(default = "default_retry_statuses")]
    pub retry_statuses: Vec<u16>,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Client-side rate limiting; `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_statuses: default_retry_statuses(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_statuses() -> Vec<u16> {
    vec![429, 500, 502, 503, 504]
}

#[allow(clippy::unnecessary_wraps)]
fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    30_000
}

// ============================================================================
// Provider Context
// ============================================================================

/// Everything a reconciler operation needs from the configured provider
///
/// Built once per process and passed by reference; holds no mutable state.
#[derive(Debug, Clone)]
pub struct ProviderContext {
    client: GitlabClient,
    config: ProviderConfig,
}

impl ProviderContext {
    /// Validate the configuration and build the API client
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_auth(config.http_client_config()?, config.auth_config())?;
        Ok(Self {
            client: GitlabClient::new(http),
            config,
        })
    }

    /// Like [`ProviderContext::new`], then verify credentials when `early_auth_check` is set
    pub async fn connect(config: ProviderConfig) -> Result<Self> {
        let context = Self::new(config)?;
        if context.config.early_auth_check {
            let user = context.client.current_user().await?;
            info!("Authenticated to GitLab as {}", user.username);
        }
        Ok(context)
    }

    /// Use an already built client
    pub fn from_client(client: GitlabClient, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// The GitLab API client
    pub fn client(&self) -> &GitlabClient {
        &self.client
    }

    /// The configuration this context was built from
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, "https://gitlab.com/api/v4/");
        assert_eq!(config.token_type, TokenType::Private);
        assert!(!config.early_auth_check);
        assert_eq!(config.http.max_retries, 3);
        assert!(config.http.rate_limit.is_some());
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = r#"
base_url: "https://gitlab.example.com"
token: "glpat-abc"
token_type: oauth
http:
  timeout_seconds: 5
  retry_backoff:
    type: constant
    initial_ms: 10
  rate_limit: null
"#;
        let config = ProviderConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.token_type, TokenType::Oauth);
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.http.max_retries, 3);
        assert_eq!(config.http.retry_backoff.backoff_type, BackoffType::Constant);
        assert_eq!(config.http.retry_backoff.max_ms, 30_000);
        assert!(config.http.rate_limit.is_none());
    }

    #[test]
    fn test_from_file_by_extension() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"token": "from-json", "early_auth_check": true}}"#).unwrap();
        let config = ProviderConfig::from_file(json.path()).unwrap();
        assert_eq!(config.token, "from-json");
        assert!(config.early_auth_check);

        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(yaml, "token: from-yaml").unwrap();
        let config = ProviderConfig::from_file(yaml.path()).unwrap();
        assert_eq!(config.token, "from-yaml");
    }

    #[test]
    fn test_from_missing_file() {
        let err = ProviderConfig::from_file("/no/such/provider.yaml").unwrap_err();
        assert!(matches!(err, Error::LocalResourceUnavailable { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (TOKEN_ENV, "env-token"),
            (BASE_URL_ENV, "https://self-hosted.example.com"),
        ]
        .into_iter()
        .collect();

        let config = ProviderConfig {
            token: "file-token".to_string(),
            ..ProviderConfig::default()
        }
        .with_overrides_from(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.token, "env-token");
        assert_eq!(config.base_url, "https://self-hosted.example.com");
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let config = ProviderConfig {
            token: "file-token".to_string(),
            ..ProviderConfig::default()
        }
        .with_overrides_from(|_| Some(String::new()));

        assert_eq!(config.token, "file-token");
        assert_eq!(config.base_url, "https://gitlab.com/api/v4/");
    }

    #[test]
    fn test_api_url_suffix() {
        let mut config = ProviderConfig::default();
        assert_eq!(config.api_url().unwrap(), "https://gitlab.com/api/v4/");

        config.base_url = "https://gitlab.example.com".to_string();
        assert_eq!(
            config.api_url().unwrap(),
            "https://gitlab.example.com/api/v4/"
        );

        config.base_url = "https://gitlab.example.com/gitlab/api/v4".to_string();
        assert_eq!(
            config.api_url().unwrap(),
            "https://gitlab.example.com/gitlab/api/v4/"
        );
    }

    #[test]
    fn test_validate() {
        let config = ProviderConfig::default();
        assert!(matches!(
            config.validate(),
            Err(Error::MissingConfigField { ref field }) if field == "token"
        ));

        let config = ProviderConfig {
            token: "t".to_string(),
            base_url: "not a url".to_string(),
            ..ProviderConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ProviderConfig {
            token: "t".to_string(),
            base_url: "ftp://gitlab.example.com".to_string(),
            ..ProviderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[tokio::test]
    async fn test_connect_early_auth_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v4/user"))
            .and(header("PRIVATE-TOKEN", "glpat-abc"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1, "username": "root"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = ProviderConfig {
            base_url: server.uri(),
            token: "glpat-abc".to_string(),
            early_auth_check: true,
            ..ProviderConfig::default()
        };
        let context = ProviderContext::connect(config).await.unwrap();
        assert!(context.config().early_auth_check);
    }

    #[tokio::test]
    async fn test_connect_bad_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v4/user"))
            .respond_with(ResponseTemplate::new(401).set_body_string("401 Unauthorized"))
            .expect(1)
            .mount(&server)
            .await;

        let config = ProviderConfig {
            base_url: server.uri(),
            token: "wrong".to_string(),
            early_auth_check: true,
            ..ProviderConfig::default()
        };
        let err = ProviderContext::connect(config).await.unwrap_err();
        assert!(matches!(err, Error::Remote { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_connect_without_check_makes_no_calls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let config = ProviderConfig {
            base_url: server.uri(),
            token: "t".to_string(),
            ..ProviderConfig::default()
        };
        ProviderContext::connect(config).await.unwrap();
    }
}
