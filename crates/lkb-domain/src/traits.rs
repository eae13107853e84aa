//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Repository clients, caches and feeders live in other crates.

use crate::{
    BindingSet, Document, EntityListener, EntityRecord, Fingerprint, LexemeWindow, QueryError,
    QueryLanguage, RegistryError, ServiceError,
};
use std::collections::HashMap;
use url::Url;

/// An open connection to a graph repository
///
/// Owned exclusively by one operation and released when dropped.
pub trait RepositoryConnection: Send + Sync {
    /// Evaluate a tuple query and return every result row
    fn evaluate(&self, language: QueryLanguage, query: &str) -> Result<Vec<BindingSet>, QueryError>;
}

/// Opens connections to one fixed repository
///
/// Implemented by the infrastructure layer (lkb-feed)
pub trait RepositoryConnector: Send + Sync {
    /// Open a fresh connection
    fn connect(&self) -> Result<Box<dyn RepositoryConnection>, QueryError>;
}

/// Opens repositories described by a configuration resource
///
/// Implemented by the infrastructure layer (lkb-feed)
pub trait RepositoryProvider: Send + Sync {
    /// Open a connection scoped to the configuration at `config_url`
    fn open(&self, config_url: &Url) -> Result<Box<dyn RepositoryConnection>, QueryError>;
}

/// Centrally configured knowledge service
pub trait KnowledgeService: Send + Sync {
    /// Obtain a live connection to the service's semantic repository
    fn semantic_repository(&self) -> Result<Box<dyn RepositoryConnection>, ServiceError>;
}

/// Registry of "trusted entity" lookups maintained by the knowledge service
pub trait TrustedEntityRegistry: Send + Sync {
    /// Query selecting all trusted entities, once the registry is initialized
    fn trusted_entities_query(&self) -> Result<String, RegistryError>;
}

/// Contract between a gazetteer host and an external entity feeder
///
/// The host drives two independent cycles: a bulk cycle once at startup
/// (`init` then `feed_all`), and a per-document cycle (`local_feed_init`,
/// any number of `local_feed_needed`, then `local_feed_end` exactly once
/// when `local_feed_init` returned true).
///
/// Implementations must keep bulk state read-only after `init` and isolate
/// per-document state by document, since documents may be processed in
/// parallel.
pub trait DictionaryFeeder: Send + Sync {
    /// Receive free-form configuration, interpreted only by the feeder
    fn init(&mut self, options: &HashMap<String, String>);

    /// Deliver the feeder's whole fixed vocabulary
    ///
    /// A feeder with no bulk content does nothing.
    fn feed_all(&self, listener: &mut dyn EntityListener);

    /// Start processing a document; `false` disables local feeding for it
    fn local_feed_init(&self, document: &Document) -> bool;

    /// Called at parser checkpoints, before a local dictionary lookup
    ///
    /// Entities passed to `listener` are scoped to the document's local
    /// dictionary. May be called any number of times, including zero.
    fn local_feed_needed(
        &self,
        document: &Document,
        window: &dyn LexemeWindow,
        listener: &mut dyn EntityListener,
    );

    /// Finish processing a document and release per-document resources
    fn local_feed_end(&self, document: &Document);
}

/// Persistent compiled dictionary keyed by a feed fingerprint
///
/// Implemented by the infrastructure layer (lkb-store)
pub trait DictionaryCache {
    /// Error type for cache operations
    type Error;

    /// Fingerprint the cached entities were built with, if any
    fn stored_fingerprint(&self) -> Result<Option<Fingerprint>, Self::Error>;

    /// Whether the cache holds a compiled dictionary at all
    fn is_populated(&self) -> Result<bool, Self::Error>;

    /// Replace the cached dictionary
    fn store(
        &mut self,
        fingerprint: Option<Fingerprint>,
        records: &[EntityRecord],
    ) -> Result<(), Self::Error>;

    /// Stream the cached entities to a listener; returns how many were sent
    fn replay(&self, listener: &mut dyn EntityListener) -> Result<usize, Self::Error>;
}
