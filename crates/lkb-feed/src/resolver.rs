//! Feed resolver - picks exactly one feed per dictionary location
//!
//! Ordered fallback, first success wins:
//!
//! 1. live knowledge service → [`RemoteServiceFeed`]
//! 2. `query.txt` + `config.ttl` → [`LocalRepositoryFeed`]
//! 3. otherwise → [`UnavailableFeed`]
//!
//! The decision is made once, at construction. A feed that later fails
//! while pushing does not fall back.

use crate::config::FeedConfig;
use crate::feed::{EntityFeed, LocalRepositoryFeed, RemoteServiceFeed, UnavailableFeed};
use crate::hasher::fingerprint;
use crate::provider::ConfigRepositoryProvider;
use crate::service::HttpKnowledgeService;
use crate::trusted::{TrustedEntities, FALLBACK_ENTITY_QUERY};
use lkb_domain::traits::{KnowledgeService, RepositoryProvider, TrustedEntityRegistry};
use lkb_domain::{DictionaryLocation, QueryLanguage};
use std::sync::Arc;
use tracing::{info, warn};

/// Chooses the data source of a dictionary
pub struct FeedResolver {
    service: Option<Arc<dyn KnowledgeService>>,
    trusted: Arc<dyn TrustedEntityRegistry>,
    provider: Arc<dyn RepositoryProvider>,
}

impl FeedResolver {
    /// Create a resolver without a knowledge service
    pub fn new(provider: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            service: None,
            trusted: Arc::new(TrustedEntities::new()),
            provider,
        }
    }

    /// Create a resolver from configuration
    ///
    /// A service that cannot even be set up is treated like an absent one.
    pub fn from_config(config: &FeedConfig) -> Self {
        let provider = Arc::new(ConfigRepositoryProvider::new(config.http_timeout()));
        let resolver = Self::new(provider);

        match HttpKnowledgeService::from_config(config) {
            Ok(Some(service)) => resolver.with_service(Arc::new(service)),
            Ok(None) => resolver,
            Err(e) => {
                info!("{}", e);
                resolver
            }
        }
    }

    /// Use a central knowledge service as the first tier
    pub fn with_service(mut self, service: Arc<dyn KnowledgeService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Use a trusted-entity registry when composing the remote query
    pub fn with_trusted_entities(mut self, registry: Arc<dyn TrustedEntityRegistry>) -> Self {
        self.trusted = registry;
        self
    }

    /// Resolve the feed for a dictionary location; never fails
    pub fn resolve(&self, location: &DictionaryLocation) -> EntityFeed {
        let feed = self
            .remote_feed()
            .or_else(|| self.local_feed(location))
            .unwrap_or_else(|| EntityFeed::Unavailable(UnavailableFeed::new(location)));

        info!(
            "Resolved {} feed for {}",
            feed.kind(),
            location.root().display()
        );
        feed
    }

    /// Query sent to the knowledge service
    ///
    /// Trusted entities unioned with the fallback query, or the fallback
    /// query alone while the registry is not initialized.
    pub fn remote_query(&self) -> String {
        match self.trusted.trusted_entities_query() {
            Ok(trusted) => format!("{} UNION {}", trusted, FALLBACK_ENTITY_QUERY),
            Err(_) => FALLBACK_ENTITY_QUERY.to_string(),
        }
    }

    fn remote_feed(&self) -> Option<EntityFeed> {
        let service = self.service.as_ref()?;

        let connection = match service.semantic_repository() {
            Ok(connection) => connection,
            Err(e) => {
                info!("Semantic repository is not available: {}", e);
                return None;
            }
        };

        Some(EntityFeed::Remote(RemoteServiceFeed::new(
            connection,
            QueryLanguage::Serql,
            self.remote_query(),
        )))
    }

    fn local_feed(&self, location: &DictionaryLocation) -> Option<EntityFeed> {
        let query_path = location.query_path();
        let config_path = location.config_path();

        if !config_path.is_file() {
            warn!("No repository configuration at {}", config_path.display());
            return None;
        }
        let config_url = location.config_url()?;

        let query = match std::fs::read_to_string(&query_path) {
            Ok(query) => query,
            Err(e) => {
                warn!("Error while reading {}: {}", query_path.display(), e);
                return None;
            }
        };
        info!("Query loaded from {}", query_path.display());

        let settings = fingerprint(&config_url, &query);
        Some(EntityFeed::Local(LocalRepositoryFeed::new(
            config_url,
            query,
            settings,
            Arc::clone(&self.provider),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedKind;
    use lkb_domain::traits::RepositoryConnection;
    use lkb_domain::{BindingSet, QueryError, ServiceError};
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use url::Url;

    struct EmptyConnection;

    impl RepositoryConnection for EmptyConnection {
        fn evaluate(&self, _: QueryLanguage, _: &str) -> Result<Vec<BindingSet>, QueryError> {
            Ok(Vec::new())
        }
    }

    struct FakeService {
        reachable: bool,
        calls: AtomicUsize,
    }

    impl FakeService {
        fn new(reachable: bool) -> Arc<Self> {
            Arc::new(Self {
                reachable,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl KnowledgeService for FakeService {
        fn semantic_repository(&self) -> Result<Box<dyn RepositoryConnection>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reachable {
                Ok(Box::new(EmptyConnection))
            } else {
                Err(ServiceError::Unavailable("connection refused".to_string()))
            }
        }
    }

    struct NoProvider;

    impl RepositoryProvider for NoProvider {
        fn open(&self, _: &Url) -> Result<Box<dyn RepositoryConnection>, QueryError> {
            Err(QueryError::Connection("not in tests".to_string()))
        }
    }

    fn resolver() -> FeedResolver {
        FeedResolver::new(Arc::new(NoProvider))
    }

    fn write_local(dir: &TempDir) {
        fs::write(dir.path().join("config.ttl"), "[] a rep:Repository .").unwrap();
        fs::write(dir.path().join("query.txt"), "SELECT ?e ?c ?l WHERE { }").unwrap();
    }

    #[test]
    fn test_reachable_service_wins() {
        let dir = TempDir::new().unwrap();
        write_local(&dir);
        let service = FakeService::new(true);
        let resolver = resolver().with_service(service.clone());

        let feed = resolver.resolve(&DictionaryLocation::new(dir.path()));
        assert_eq!(feed.kind(), FeedKind::RemoteService);
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unreachable_service_falls_back_to_local() {
        let dir = TempDir::new().unwrap();
        write_local(&dir);
        let resolver = resolver().with_service(FakeService::new(false));

        let feed = resolver.resolve(&DictionaryLocation::new(dir.path()));
        assert_eq!(feed.kind(), FeedKind::LocalRepository);
    }

    #[test]
    fn test_nothing_available_gives_unavailable_feed() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver().with_service(FakeService::new(false));

        let feed = resolver.resolve(&DictionaryLocation::new(dir.path()));
        assert_eq!(feed.kind(), FeedKind::Unavailable);
    }

    #[test]
    fn test_query_without_config_is_not_local() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("query.txt"), "SELECT ?e").unwrap();

        let feed = resolver().resolve(&DictionaryLocation::new(dir.path()));
        assert_eq!(feed.kind(), FeedKind::Unavailable);
    }

    #[test]
    fn test_config_without_query_is_not_local() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.ttl"), "[] a rep:Repository .").unwrap();

        let feed = resolver().resolve(&DictionaryLocation::new(dir.path()));
        assert_eq!(feed.kind(), FeedKind::Unavailable);
    }

    #[test]
    fn test_remote_query_without_registry() {
        assert_eq!(resolver().remote_query(), FALLBACK_ENTITY_QUERY);
    }

    #[test]
    fn test_remote_query_with_registry() {
        let resolver = resolver().with_trusted_entities(Arc::new(TrustedEntities::with_query(
            "select E, C, L from {E} kim:trusted {C}",
        )));

        assert_eq!(
            resolver.remote_query(),
            format!(
                "select E, C, L from {{E}} kim:trusted {{C}} UNION {}",
                FALLBACK_ENTITY_QUERY
            )
        );
    }
}
