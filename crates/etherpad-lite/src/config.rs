//! Configuration for the Etherpad HTTP client

use crate::error::{EtherpadError, Result};
use crate::url::clean_url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_IDLE_PER_HOST: usize = 10;

/// Configuration for the Etherpad client
///
/// On disk (TOML) the timeout is written in whole seconds:
///
/// ```toml
/// base_url = "http://localhost:9001/api/1.2.12"
/// api_key = "secret"
/// timeout_secs = 10
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:9001/api/1.2.12`
    pub base_url: String,
    /// Value sent as the `apikey` query parameter on every call
    pub api_key: String,
    /// Request timeout
    #[serde(
        rename = "timeout_secs",
        with = "duration_secs",
        default = "default_timeout"
    )]
    pub timeout: Duration,
    /// Maximum number of idle connections per host
    #[serde(default = "default_max_idle_per_host")]
    pub max_idle_per_host: usize,
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

fn default_max_idle_per_host() -> usize {
    DEFAULT_MAX_IDLE_PER_HOST
}

impl ClientConfig {
    /// Create a configuration with default timeout and pool settings
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: default_timeout(),
            max_idle_per_host: default_max_idle_per_host(),
        }
    }

    /// Create a new builder for client configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| EtherpadError::InvalidConfig(format!("failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EtherpadError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Base URL with a single trailing slash removed
    pub fn base_url(&self) -> &str {
        clean_url(&self.base_url)
    }

    /// Check the configuration for obvious mistakes
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(EtherpadError::InvalidConfig(
                "base_url cannot be empty".to_string(),
            ));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(EtherpadError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got {}",
                base
            )));
        }
        if self.api_key.is_empty() {
            return Err(EtherpadError::InvalidConfig(
                "api_key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("max_idle_per_host", &self.max_idle_per_host)
            .finish()
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    max_idle_per_host: Option<usize>,
}

impl ClientConfigBuilder {
    /// Set the API root URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of idle connections per host
    pub fn max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = Some(max);
        self
    }

    /// Build the client configuration
    pub fn build(self) -> Result<ClientConfig> {
        let config = ClientConfig {
            base_url: self.base_url.unwrap_or_default(),
            api_key: self.api_key.unwrap_or_default(),
            timeout: self.timeout.unwrap_or_else(default_timeout),
            max_idle_per_host: self
                .max_idle_per_host
                .unwrap_or_else(default_max_idle_per_host),
        };
        config.validate()?;
        Ok(config)
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
