//! Loading a dictionary through a compiled cache

use crate::error::LoadError;
use lkb_domain::traits::DictionaryCache;
use lkb_domain::{EntityListener, EntityRecord, QueryError};
use lkb_feed::{EntityFeed, FeedKind};
use std::fmt;
use tracing::{debug, info, warn};

/// How a dictionary load was satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The cache matched the feed's fingerprint and was replayed
    CacheHit {
        /// Entities replayed
        entities: usize,
    },
    /// The feed was pushed and the cache replaced
    Rebuilt {
        /// Entities delivered by the feed
        entities: usize,
    },
    /// The feed failed and a stale cache was replayed instead
    CacheFallback {
        /// Entities replayed
        entities: usize,
        /// Why the feed failed
        error: QueryError,
    },
}

impl LoadOutcome {
    /// Number of entities delivered to the listener
    pub fn entities(&self) -> usize {
        match self {
            LoadOutcome::CacheHit { entities }
            | LoadOutcome::Rebuilt { entities }
            | LoadOutcome::CacheFallback { entities, .. } => *entities,
        }
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOutcome::CacheHit { entities } => write!(f, "cache hit ({} entities)", entities),
            LoadOutcome::Rebuilt { entities } => write!(f, "rebuilt ({} entities)", entities),
            LoadOutcome::CacheFallback { entities, error } => {
                write!(f, "cache fallback ({} entities): {}", entities, error)
            }
        }
    }
}

/// Fills a dictionary from a feed, skipping the feed when the cache is current
///
/// A local feed carries a fingerprint of its settings; when the cache was
/// built with the same fingerprint it is replayed instead of querying the
/// repository. Remote and unavailable feeds have no fingerprint, so they are
/// always pushed, falling back to a populated cache if the push fails.
pub struct DictionaryLoader<C> {
    cache: C,
}

impl<C> DictionaryLoader<C>
where
    C: DictionaryCache,
    C::Error: fmt::Display,
{
    /// Create a loader over a cache
    pub fn new(cache: C) -> Self {
        Self { cache }
    }

    /// The underlying cache
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Take the cache back
    pub fn into_cache(self) -> C {
        self.cache
    }

    /// Deliver the feed's entities to `listener`, via the cache when possible
    pub fn load(
        &mut self,
        feed: &EntityFeed,
        listener: &mut dyn EntityListener,
    ) -> Result<LoadOutcome, LoadError> {
        let populated = self.cache.is_populated().map_err(cache_error)?;

        if let Some(fingerprint) = feed.fingerprint() {
            let stored = self.cache.stored_fingerprint().map_err(cache_error)?;
            if populated && stored == Some(fingerprint) {
                let entities = self.cache.replay(listener).map_err(cache_error)?;
                info!("Dictionary cache is current ({}), replayed {} entities", fingerprint, entities);
                return Ok(LoadOutcome::CacheHit { entities });
            }
            debug!(
                "Dictionary cache is stale: stored {:?}, feed {}",
                stored.map(|f| f.value()),
                fingerprint
            );
        } else if feed.kind() == FeedKind::Unavailable && populated {
            let entities = self.cache.replay(listener).map_err(cache_error)?;
            warn!("No feed configured, replayed {} cached entities", entities);
            return Ok(LoadOutcome::CacheHit { entities });
        }

        let mut records: Vec<EntityRecord> = Vec::new();
        match feed.push(&mut records) {
            Ok(_) => {
                self.cache
                    .store(feed.fingerprint(), &records)
                    .map_err(cache_error)?;
                for record in &records {
                    listener.add_entity(&record.instance_uri, &record.class_uri, &record.alias_label);
                }
                info!("Dictionary rebuilt from {} feed: {} entities", feed.kind(), records.len());
                Ok(LoadOutcome::Rebuilt {
                    entities: records.len(),
                })
            }
            Err(error) if feed.kind() == FeedKind::RemoteService && populated => {
                warn!("Remote feed failed, using cached dictionary: {}", error);
                let entities = self.cache.replay(listener).map_err(cache_error)?;
                Ok(LoadOutcome::CacheFallback { entities, error })
            }
            Err(error) => Err(LoadError::Query(error)),
        }
    }
}

fn cache_error<E: fmt::Display>(e: E) -> LoadError {
    LoadError::Cache(e.to_string())
}
