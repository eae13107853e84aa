//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use lkb_enrichment::EnrichmentConfig;
use lkb_feed::FeedConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Feed resolution settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Enrichment settings; required by `enrich`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentConfig>,

    /// Cache file created inside a dictionary directory by `build`
    #[serde(default = "default_cache_file_name")]
    pub cache_file_name: String,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".lkb").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path falls back to defaults
    /// when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.feed.validate()?;
        if let Some(enrichment) = &self.enrichment {
            enrichment.validate()?;
        }
        if self.cache_file_name.trim().is_empty() {
            return Err(CliError::Config("cache_file_name must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            enrichment: None,
            cache_file_name: default_cache_file_name(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_cache_file_name() -> String {
    "dictionary.cache.db".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.feed.service.is_none());
        assert!(config.enrichment.is_none());
        assert_eq!(config.cache_file_name, "dictionary.cache.db");
        assert!(config.settings.color);
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lkb.toml");
        fs::write(
            &path,
            r#"
            cache_file_name = "cities.db"

            [feed]
            http_timeout_secs = 5

            [feed.service]
            server_url = "http://localhost:8080/openrdf-sesame"
            repository_id = "kb"

            [enrichment]
            server = "http://localhost:8080/openrdf-sesame"
            repository_id = "dbpedia"

            [settings]
            format = "json"
            "#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.cache_file_name, "cities.db");
        assert_eq!(config.feed.http_timeout_secs, 5);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(
            config.enrichment.map(|e| e.repository_id),
            Some("dbpedia".to_string())
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load(Some(&temp_dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_invalid_enrichment_section() {
        let mut config = Config::default();
        config.enrichment = Some(EnrichmentConfig::new("http://s", ""));
        assert!(config.validate().is_err());
    }
}
