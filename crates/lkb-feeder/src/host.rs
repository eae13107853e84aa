//! Host side of the feeder protocol

use crate::dictionary::EntityDictionary;
use lkb_domain::traits::DictionaryFeeder;
use lkb_domain::{Document, EntityListener, EntityRecord, LexemeWindow};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Drives one feeder for a gazetteer
///
/// Cloning is cheap; clones share the feeder, so documents may be processed
/// on several threads at once.
#[derive(Clone)]
pub struct FeederHost {
    feeder: Arc<dyn DictionaryFeeder>,
}

impl FeederHost {
    /// Initialize `feeder` with its options and take ownership of it
    pub fn new<F>(mut feeder: F, options: &HashMap<String, String>) -> Self
    where
        F: DictionaryFeeder + 'static,
    {
        feeder.init(options);
        Self {
            feeder: Arc::new(feeder),
        }
    }

    /// Run the bulk cycle into the global dictionary
    ///
    /// Returns how many records the feeder delivered.
    pub fn load_global(&self, dictionary: &mut EntityDictionary) -> usize {
        let before = dictionary.len();
        self.feeder.feed_all(dictionary);
        let added = dictionary.len() - before;
        debug!("Bulk feed delivered {} entities", added);
        added
    }

    /// Start the per-document cycle
    ///
    /// Returns `None` when the feeder does not support local feeding for
    /// this document; the cycle is then skipped entirely.
    pub fn begin_document<'d>(&self, document: &'d Document) -> Option<LocalFeedSession<'d>> {
        if !self.feeder.local_feed_init(document) {
            debug!("Local feeding disabled for {}", document.id());
            return None;
        }
        Some(LocalFeedSession {
            feeder: Arc::clone(&self.feeder),
            document,
            local: EntityDictionary::new(),
            checkpoints: 0,
            finished: false,
        })
    }
}

/// Per-document local feeding session
///
/// `local_feed_end` is called exactly once: by [`finish`](Self::finish), or
/// on drop if the session is abandoned.
pub struct LocalFeedSession<'d> {
    feeder: Arc<dyn DictionaryFeeder>,
    document: &'d Document,
    local: EntityDictionary,
    checkpoints: usize,
    finished: bool,
}

impl LocalFeedSession<'_> {
    /// Report a parser checkpoint, before a local dictionary lookup
    ///
    /// Returns the entities the feeder streamed for this window; they are
    /// also added to the session's local dictionary.
    pub fn on_checkpoint(&mut self, window: &dyn LexemeWindow) -> Vec<EntityRecord> {
        self.checkpoints += 1;

        let mut emitted: Vec<EntityRecord> = Vec::new();
        self.feeder
            .local_feed_needed(self.document, window, &mut emitted);

        for record in &emitted {
            self.local
                .add_entity(&record.instance_uri, &record.class_uri, &record.alias_label);
        }
        emitted
    }

    /// The document's local dictionary so far
    pub fn local_dictionary(&self) -> &EntityDictionary {
        &self.local
    }

    /// Number of checkpoints reported
    pub fn checkpoints(&self) -> usize {
        self.checkpoints
    }

    /// End the session
    pub fn finish(mut self) {
        self.end();
    }

    fn end(&mut self) {
        if !self.finished {
            self.finished = true;
            self.feeder.local_feed_end(self.document);
            debug!(
                "Local feed for {} ended after {} checkpoints, {} entities",
                self.document.id(),
                self.checkpoints,
                self.local.len()
            );
        }
    }
}

impl Drop for LocalFeedSession<'_> {
    fn drop(&mut self) {
        self.end();
    }
}
