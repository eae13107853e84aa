//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Feed configuration error
    #[error(transparent)]
    FeedConfig(#[from] lkb_feed::ConfigError),

    /// Query or repository error
    #[error(transparent)]
    Query(#[from] lkb_domain::QueryError),

    /// Dictionary load error
    #[error(transparent)]
    Load(#[from] lkb_feeder::LoadError),

    /// Cache error
    #[error("Cache error: {0}")]
    Cache(#[from] lkb_store::CacheError),

    /// Enrichment error
    #[error(transparent)]
    Enrichment(#[from] lkb_enrichment::EnrichmentError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
