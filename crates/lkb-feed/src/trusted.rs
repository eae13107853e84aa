//! Trusted-entity lookups and the fixed fallback entity query

use lkb_domain::traits::TrustedEntityRegistry;
use lkb_domain::RegistryError;
use std::sync::OnceLock;

/// SeRQL query selecting every alias of every entity with its direct type
///
/// Used alone when the trusted-entity registry is not initialized, and
/// unioned with the registry's query otherwise.
pub const FALLBACK_ENTITY_QUERY: &str = "select distinct E, C, L \
from {E} sesame:directType {C}, {E} pkm:hasAlias {A} rdfs:label {L} \
using namespace pkm = <http://proton.semanticweb.org/2006/05/protonkm#>";

/// Registry of the trusted-entity query, filled once the labels model is loaded
///
/// # Examples
///
/// ```
/// use lkb_domain::traits::TrustedEntityRegistry;
/// use lkb_feed::TrustedEntities;
///
/// let registry = TrustedEntities::new();
/// assert!(registry.trusted_entities_query().is_err());
///
/// registry.initialize("select E, C, L from {E} rdf:type {C}, {E} rdfs:label {L}");
/// assert!(registry.trusted_entities_query().is_ok());
/// ```
#[derive(Debug, Default)]
pub struct TrustedEntities {
    query: OnceLock<String>,
}

impl TrustedEntities {
    /// Create an uninitialized registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that is already initialized
    pub fn with_query(query: impl Into<String>) -> Self {
        let registry = Self::new();
        registry.initialize(query);
        registry
    }

    /// Initialize the registry; later calls are ignored
    ///
    /// Returns whether this call performed the initialization.
    pub fn initialize(&self, query: impl Into<String>) -> bool {
        self.query.set(query.into()).is_ok()
    }
}

impl TrustedEntityRegistry for TrustedEntities {
    fn trusted_entities_query(&self) -> Result<String, RegistryError> {
        self.query.get().cloned().ok_or(RegistryError::NotInitialized)
    }
}
