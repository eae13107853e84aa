//! Error types for enrichment

use lkb_domain::QueryError;
use thiserror::Error;

/// Errors that fail a whole enrichment run
///
/// Query failures for individual annotations are not errors at this level;
/// they are logged and counted in the report.
#[derive(Error, Debug)]
pub enum EnrichmentError {
    /// The query template is unusable
    #[error("Invalid query template: {0}")]
    Template(String),

    /// No connection to the repository could be opened
    #[error("Repository unavailable: {0}")]
    Connection(QueryError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
