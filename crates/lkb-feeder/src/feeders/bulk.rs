//! Bulk feeder backed by a resolved entity feed

use lkb_domain::traits::DictionaryFeeder;
use lkb_domain::{Document, EntityListener, LexemeWindow, QueryError};
use lkb_feed::EntityFeed;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{error, info};

/// Streams an [`EntityFeed`] into the global dictionary at startup
///
/// The listener contract has no error channel, so a failing push is logged
/// and kept for [`last_error`](Self::last_error). Local feeding is not
/// supported.
pub struct BulkFeeder {
    feed: EntityFeed,
    last_error: Mutex<Option<QueryError>>,
}

impl BulkFeeder {
    /// Wrap a resolved feed
    pub fn new(feed: EntityFeed) -> Self {
        Self {
            feed,
            last_error: Mutex::new(None),
        }
    }

    /// The wrapped feed
    pub fn feed(&self) -> &EntityFeed {
        &self.feed
    }

    /// Error of the most recent bulk feed, if it failed
    pub fn last_error(&self) -> Option<QueryError> {
        self.last_error.lock().ok().and_then(|slot| slot.clone())
    }

    fn record(&self, outcome: Option<QueryError>) {
        if let Ok(mut slot) = self.last_error.lock() {
            *slot = outcome;
        }
    }
}

impl DictionaryFeeder for BulkFeeder {
    fn init(&mut self, options: &HashMap<String, String>) {
        if !options.is_empty() {
            info!("Bulk feeder ignores {} option(s)", options.len());
        }
    }

    fn feed_all(&self, listener: &mut dyn EntityListener) {
        match self.feed.push(listener) {
            Ok(count) => {
                info!("Bulk feed from {} source: {} entities", self.feed.kind(), count);
                self.record(None);
            }
            Err(e) => {
                error!("Bulk feed from {} source failed: {}", self.feed.kind(), e);
                self.record(Some(e));
            }
        }
    }

    fn local_feed_init(&self, _document: &Document) -> bool {
        false
    }

    fn local_feed_needed(
        &self,
        _document: &Document,
        _window: &dyn LexemeWindow,
        _listener: &mut dyn EntityListener,
    ) {
    }

    fn local_feed_end(&self, _document: &Document) {}
}
