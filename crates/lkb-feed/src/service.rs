//! Central knowledge service reached over HTTP

use crate::config::{FeedConfig, ServiceConfig};
use crate::sparql::{build_client, SparqlHttpConnection};
use lkb_domain::traits::{KnowledgeService, RepositoryConnection};
use lkb_domain::ServiceError;
use reqwest::blocking::Client;
use tracing::debug;

/// Knowledge service backed by a Sesame/RDF4J server
///
/// Reachability is probed with `GET <server>/protocol` every time a
/// repository is requested; no connection is kept between requests.
#[derive(Debug, Clone)]
pub struct HttpKnowledgeService {
    config: ServiceConfig,
    client: Client,
}

impl HttpKnowledgeService {
    /// Create a service client from the feed configuration
    ///
    /// Returns `Ok(None)` when no service is configured.
    pub fn from_config(config: &FeedConfig) -> Result<Option<Self>, ServiceError> {
        let Some(service) = &config.service else {
            return Ok(None);
        };
        let client = build_client(config.http_timeout())
            .map_err(|e| ServiceError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Some(Self {
            config: service.clone(),
            client,
        }))
    }

    /// Service settings
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Endpoint probed before a repository is handed out
    pub fn probe_url(&self) -> String {
        format!("{}/protocol", self.config.server_url.trim_end_matches('/'))
    }
}

impl KnowledgeService for HttpKnowledgeService {
    fn semantic_repository(&self) -> Result<Box<dyn RepositoryConnection>, ServiceError> {
        let probe = self.probe_url();
        debug!("Probing knowledge service at {}", probe);

        let response = self
            .client
            .get(&probe)
            .send()
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ServiceError::Unavailable(format!(
                "{} answered HTTP {}",
                probe,
                response.status()
            )));
        }

        Ok(Box::new(SparqlHttpConnection::new(
            self.config.repository_url(),
            self.client.clone(),
        )))
    }
}
