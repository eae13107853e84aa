//! Configuration for feed resolution
//!
//! Loads the optional central knowledge service and HTTP client settings
//! from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Feed configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Semantically invalid value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Central knowledge service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the Sesame/RDF4J server (e.g., "http://localhost:8080/openrdf-sesame")
    pub server_url: String,

    /// Repository holding the knowledge base
    pub repository_id: String,
}

impl ServiceConfig {
    /// URL of the configured repository
    pub fn repository_url(&self) -> String {
        format!(
            "{}/repositories/{}",
            self.server_url.trim_end_matches('/'),
            self.repository_id
        )
    }
}

/// Feed resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Knowledge service to try first; `None` skips straight to local feeds
    #[serde(default)]
    pub service: Option<ServiceConfig>,

    /// Timeout for each repository HTTP request (seconds)
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

fn default_http_timeout() -> u64 {
    30
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            service: None,
            http_timeout_secs: default_http_timeout(),
        }
    }
}

impl FeedConfig {
    /// Get the HTTP timeout as a Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if let Some(service) = &self.service {
            if service.server_url.is_empty() {
                return Err(ConfigError::Invalid("service.server_url is empty".to_string()));
            }
            if service.repository_id.is_empty() {
                return Err(ConfigError::Invalid("service.repository_id is empty".to_string()));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: FeedConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}
