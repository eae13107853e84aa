//! Error types for dictionary loading

use lkb_domain::QueryError;
use thiserror::Error;

/// Errors that can occur while loading a dictionary
#[derive(Error, Debug)]
pub enum LoadError {
    /// The feed failed and no cache could stand in for it
    #[error("Feed error: {0}")]
    Query(#[from] QueryError),

    /// Compiled cache error
    #[error("Cache error: {0}")]
    Cache(String),
}
