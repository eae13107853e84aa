//! Entity feeds - the three data sources a dictionary can be filled from

use lkb_domain::traits::{RepositoryConnection, RepositoryProvider};
use lkb_domain::{
    BindingSet, DictionaryLocation, EntityListener, Fingerprint, QueryError, QueryLanguage,
};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Which tier of the resolution policy produced a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    /// Live knowledge service
    RemoteService,
    /// Private repository described by `config.ttl`
    LocalRepository,
    /// No usable source
    Unavailable,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeedKind::RemoteService => "remote-service",
            FeedKind::LocalRepository => "local-repository",
            FeedKind::Unavailable => "unavailable",
        };
        f.write_str(name)
    }
}

/// A source of entity records for one dictionary
pub enum EntityFeed {
    /// Query against the central knowledge service
    Remote(RemoteServiceFeed),
    /// Query against a private repository
    Local(LocalRepositoryFeed),
    /// Placeholder that fails when actually used
    Unavailable(UnavailableFeed),
}

impl EntityFeed {
    /// Push every currently available entity to `listener`
    ///
    /// Runs synchronously and returns after completion or on the first query
    /// failure. Failures are never retried against another source.
    pub fn push(&self, listener: &mut dyn EntityListener) -> Result<usize, QueryError> {
        match self {
            EntityFeed::Remote(feed) => feed.push(listener),
            EntityFeed::Local(feed) => feed.push(listener),
            EntityFeed::Unavailable(feed) => feed.push(listener),
        }
    }

    /// Tier that produced this feed
    pub fn kind(&self) -> FeedKind {
        match self {
            EntityFeed::Remote(_) => FeedKind::RemoteService,
            EntityFeed::Local(_) => FeedKind::LocalRepository,
            EntityFeed::Unavailable(_) => FeedKind::Unavailable,
        }
    }

    /// Cache fingerprint; only local repository feeds have one
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        match self {
            EntityFeed::Local(feed) => Some(feed.fingerprint()),
            _ => None,
        }
    }
}

impl fmt::Debug for EntityFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityFeed::Remote(feed) => f
                .debug_struct("RemoteServiceFeed")
                .field("language", &feed.language)
                .finish_non_exhaustive(),
            EntityFeed::Local(feed) => f
                .debug_struct("LocalRepositoryFeed")
                .field("config_url", &feed.config_url.as_str())
                .field("fingerprint", &feed.fingerprint)
                .finish_non_exhaustive(),
            EntityFeed::Unavailable(feed) => f
                .debug_struct("UnavailableFeed")
                .field("config_path", &feed.config_path)
                .finish(),
        }
    }
}

/// Feed bound to an already open connection of the knowledge service
pub struct RemoteServiceFeed {
    connection: Box<dyn RepositoryConnection>,
    language: QueryLanguage,
    query: String,
}

impl RemoteServiceFeed {
    /// Bind a query to an open connection
    pub fn new(
        connection: Box<dyn RepositoryConnection>,
        language: QueryLanguage,
        query: impl Into<String>,
    ) -> Self {
        Self {
            connection,
            language,
            query: query.into(),
        }
    }

    /// Query text the feed evaluates
    pub fn query(&self) -> &str {
        &self.query
    }

    fn push(&self, listener: &mut dyn EntityListener) -> Result<usize, QueryError> {
        let rows = self.connection.evaluate(self.language, &self.query)?;
        stream_rows(&rows, listener)
    }
}

/// Feed reading a private repository described by a configuration resource
pub struct LocalRepositoryFeed {
    config_url: Url,
    query: String,
    fingerprint: Fingerprint,
    provider: Arc<dyn RepositoryProvider>,
}

impl LocalRepositoryFeed {
    /// Bind a query to a repository configuration
    ///
    /// The fingerprint is computed by the caller so it can be compared
    /// against a cached value before the feed is ever pushed.
    pub fn new(
        config_url: Url,
        query: impl Into<String>,
        fingerprint: Fingerprint,
        provider: Arc<dyn RepositoryProvider>,
    ) -> Self {
        Self {
            config_url,
            query: query.into(),
            fingerprint,
            provider,
        }
    }

    /// Fingerprint of the configuration and query
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Configuration resource the repository is opened from
    pub fn config_url(&self) -> &Url {
        &self.config_url
    }

    /// Query text the feed evaluates
    pub fn query(&self) -> &str {
        &self.query
    }

    fn push(&self, listener: &mut dyn EntityListener) -> Result<usize, QueryError> {
        // Dropped on every exit path, which closes the repository.
        let connection = self.provider.open(&self.config_url)?;
        debug!("Opened repository from {}", self.config_url);
        let rows = connection.evaluate(QueryLanguage::Sparql, &self.query)?;
        stream_rows(&rows, listener)
    }
}

/// Feed for a location with no usable data source
///
/// Construction never fails or touches the filesystem, so a gazetteer with a
/// valid compiled cache can initialize without any source.
#[derive(Debug, Clone)]
pub struct UnavailableFeed {
    config_path: PathBuf,
}

impl UnavailableFeed {
    /// Create the placeholder for a location
    pub fn new(location: &DictionaryLocation) -> Self {
        Self {
            config_path: location.config_path(),
        }
    }

    fn push(&self, _listener: &mut dyn EntityListener) -> Result<usize, QueryError> {
        Err(QueryError::ConfigurationMissing {
            path: self.config_path.clone(),
        })
    }
}

/// Emit one entity per row: instance, class and alias are the first three values
fn stream_rows(rows: &[BindingSet], listener: &mut dyn EntityListener) -> Result<usize, QueryError> {
    for (index, row) in rows.iter().enumerate() {
        let mut values = row.values();
        match (values.next(), values.next(), values.next()) {
            (Some(instance), Some(class), Some(alias)) => {
                listener.add_entity(instance, class, alias);
            }
            _ => {
                return Err(QueryError::Evaluation(format!(
                    "Result row {} has {} bound values, expected instance, class and alias",
                    index,
                    row.len()
                )));
            }
        }
    }
    info!("Fed {} entities", rows.len());
    Ok(rows.len())
}
