//! Repository provider driven by a dictionary's `config.ttl`
//!
//! The configuration must declare either a Sesame HTTP repository
//! (`hr:repositoryURL <...>`) or a SPARQL endpoint repository
//! (`sparql:query-endpoint <...>`). Prefixed and full-IRI forms are accepted.

use crate::sparql::{build_client, SparqlHttpConnection};
use lkb_domain::traits::{RepositoryConnection, RepositoryProvider};
use lkb_domain::QueryError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;
use url::Url;

static REPOSITORY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:hr:repositoryURL|<http://www\.openrdf\.org/config/repository/http#repositoryURL>)\s*<([^>\s]+)>",
    )
    .expect("repository URL pattern is valid")
});

static QUERY_ENDPOINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:sparql:query-endpoint|<http://www\.openrdf\.org/config/repository/sparql#query-endpoint>)\s*<([^>\s]+)>",
    )
    .expect("query endpoint pattern is valid")
});

/// Opens the repository a configuration resource points at
#[derive(Debug, Clone)]
pub struct ConfigRepositoryProvider {
    timeout: Duration,
}

impl ConfigRepositoryProvider {
    /// Create a provider whose connections use the given HTTP timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for ConfigRepositoryProvider {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Extract the repository endpoint declared by a configuration
pub fn repository_endpoint(config: &str) -> Option<String> {
    REPOSITORY_URL
        .captures(config)
        .or_else(|| QUERY_ENDPOINT.captures(config))
        .map(|caps| caps[1].to_string())
}

impl RepositoryProvider for ConfigRepositoryProvider {
    fn open(&self, config_url: &Url) -> Result<Box<dyn RepositoryConnection>, QueryError> {
        let path = config_url.to_file_path().map_err(|_| {
            QueryError::Connection(format!("{} is not a local configuration file", config_url))
        })?;
        let config = read_config(&path)?;

        let endpoint = repository_endpoint(&config).ok_or_else(|| {
            QueryError::Connection(format!(
                "{} declares no supported repository (expected hr:repositoryURL or sparql:query-endpoint)",
                path.display()
            ))
        })?;
        debug!("Configuration {} points at {}", path.display(), endpoint);

        let client = build_client(self.timeout)
            .map_err(|e| QueryError::Connection(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Box::new(SparqlHttpConnection::new(endpoint, client)))
    }
}

fn read_config(path: &Path) -> Result<String, QueryError> {
    std::fs::read_to_string(path).map_err(|_| QueryError::ConfigurationMissing {
        path: path.to_path_buf(),
    })
}
