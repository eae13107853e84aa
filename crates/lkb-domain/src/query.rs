//! Query results and the error taxonomy of repository access

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Query language understood by a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryLanguage {
    /// SPARQL 1.1
    Sparql,
    /// Sesame RDF Query Language
    Serql,
}

impl QueryLanguage {
    /// Protocol name of the language (the `queryLn` parameter value)
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryLanguage::Sparql => "sparql",
            QueryLanguage::Serql => "serql",
        }
    }
}

impl fmt::Display for QueryLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a tuple query result
///
/// Bindings keep projection order; unbound variables are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSet {
    bindings: Vec<(String, String)>,
}

impl BindingSet {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.push((name.into(), value.into()));
    }

    /// Builder-style [`push`](Self::push)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Value bound to a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Bound values in projection order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(_, v)| v.as_str())
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no variable is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Errors raised while preparing or evaluating a query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The repository rejected the query text
    #[error("Malformed query [{query}]: {message}")]
    Malformed {
        /// Offending query text
        query: String,
        /// Parser message reported by the repository
        message: String,
    },

    /// The query was accepted but evaluation failed
    #[error("Query evaluation failed: {0}")]
    Evaluation(String),

    /// The repository could not be reached or opened
    #[error("Repository connection error: {0}")]
    Connection(String),

    /// No usable data source configuration exists
    #[error("Could not find a valid configuration file. Please check if {} exists.", path.display())]
    ConfigurationMissing {
        /// Expected path of the configuration resource
        path: PathBuf,
    },
}

/// Errors raised when asking the central knowledge service for a repository
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No knowledge service is configured
    #[error("Knowledge service not configured")]
    NotConfigured,

    /// The service is configured but cannot be reached
    #[error("Knowledge service unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the trusted-entity registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry has not been initialized yet
    #[error("Trusted entity registry is not initialized")]
    NotInitialized,
}
