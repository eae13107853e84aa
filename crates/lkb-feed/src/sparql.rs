//! Sesame/SPARQL HTTP repository client
//!
//! Tuple queries are POSTed to the repository URL as form fields `query` and
//! `queryLn`; results come back in the SPARQL 1.1 JSON results format.
//!
//! # Examples
//!
//! ```no_run
//! use lkb_domain::traits::RepositoryConnector;
//! use lkb_domain::QueryLanguage;
//! use lkb_feed::SparqlHttpRepository;
//! use std::time::Duration;
//!
//! let repository = SparqlHttpRepository::new(
//!     "http://localhost:8080/openrdf-sesame/repositories/owlim",
//!     Duration::from_secs(30),
//! ).unwrap();
//! let connection = repository.connect().unwrap();
//! let rows = connection.evaluate(QueryLanguage::Sparql, "SELECT * WHERE { ?s ?p ?o } LIMIT 1");
//! ```

use lkb_domain::traits::{RepositoryConnection, RepositoryConnector};
use lkb_domain::{BindingSet, QueryError, QueryLanguage};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Media type of SPARQL JSON results
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Build the blocking HTTP client shared by connections
pub(crate) fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Connector for one HTTP repository
#[derive(Debug, Clone)]
pub struct SparqlHttpRepository {
    repository_url: String,
    client: Client,
}

impl SparqlHttpRepository {
    /// Create a connector for a repository URL
    pub fn new(repository_url: impl Into<String>, timeout: Duration) -> Result<Self, QueryError> {
        let client = build_client(timeout)
            .map_err(|e| QueryError::Connection(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            repository_url: repository_url.into(),
            client,
        })
    }

    /// Create a connector for `<server>/repositories/<id>`
    pub fn for_server(server_url: &str, repository_id: &str, timeout: Duration) -> Result<Self, QueryError> {
        let url = format!(
            "{}/repositories/{}",
            server_url.trim_end_matches('/'),
            repository_id
        );
        Self::new(url, timeout)
    }

    /// Repository URL queries are sent to
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }
}

impl RepositoryConnector for SparqlHttpRepository {
    fn connect(&self) -> Result<Box<dyn RepositoryConnection>, QueryError> {
        Ok(Box::new(SparqlHttpConnection::new(
            self.repository_url.clone(),
            self.client.clone(),
        )))
    }
}

/// Connection to an HTTP repository
///
/// The protocol is stateless, so the connection only holds the endpoint and
/// a handle to the pooled client.
#[derive(Debug, Clone)]
pub struct SparqlHttpConnection {
    repository_url: String,
    client: Client,
}

impl SparqlHttpConnection {
    /// Create a connection from an endpoint and a client
    pub fn new(repository_url: impl Into<String>, client: Client) -> Self {
        Self {
            repository_url: repository_url.into(),
            client,
        }
    }
}

impl RepositoryConnection for SparqlHttpConnection {
    fn evaluate(&self, language: QueryLanguage, query: &str) -> Result<Vec<BindingSet>, QueryError> {
        debug!("Evaluating {} query against {}", language, self.repository_url);

        let response = self
            .client
            .post(&self.repository_url)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query), ("queryLn", language.as_str())])
            .send()
            .map_err(|e| QueryError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| QueryError::Connection(e.to_string()))?;

        if status == StatusCode::BAD_REQUEST {
            return Err(QueryError::Malformed {
                query: query.to_string(),
                message: body,
            });
        }
        if !status.is_success() {
            return Err(QueryError::Evaluation(format!("HTTP {}: {}", status, body)));
        }

        parse_results(&body)
    }
}

#[derive(Deserialize)]
struct SparqlResults {
    head: SparqlHead,
    #[serde(default)]
    results: Option<SparqlBindings>,
}

#[derive(Deserialize)]
struct SparqlHead {
    #[serde(default)]
    vars: Vec<String>,
}

#[derive(Deserialize)]
struct SparqlBindings {
    bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Deserialize)]
struct SparqlTerm {
    value: String,
}

/// Parse a SPARQL JSON results document into rows in projection order
///
/// Boolean (ASK) results carry no rows.
pub fn parse_results(body: &str) -> Result<Vec<BindingSet>, QueryError> {
    let parsed: SparqlResults = serde_json::from_str(body)
        .map_err(|e| QueryError::Evaluation(format!("Invalid SPARQL JSON results: {}", e)))?;

    let Some(results) = parsed.results else {
        return Ok(Vec::new());
    };

    let rows = results
        .bindings
        .into_iter()
        .map(|mut solution| {
            let mut row = BindingSet::new();
            for var in &parsed.head.vars {
                if let Some(term) = solution.remove(var) {
                    row.push(var.clone(), term.value);
                }
            }
            row
        })
        .collect();

    Ok(rows)
}
