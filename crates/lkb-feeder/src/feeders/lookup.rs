//! Lazy per-document feeder driven by the parser's lookahead
//!
//! Nothing is fed in bulk. At each checkpoint the pending lexemes are matched
//! against the first token of every alias, and entities whose alias could
//! start at one of those lexemes are streamed into the document's local
//! dictionary, each at most once per document.

use lkb_domain::traits::DictionaryFeeder;
use lkb_domain::{Document, DocumentId, EntityListener, EntityRecord, LexemeWindow, QueryError};
use lkb_feed::EntityFeed;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Option: match lexemes case-sensitively (`"true"`/`"false"`)
pub const CASE_SENSITIVE_OPTION: &str = "case_sensitive";

/// Option: inspect at most this many lexemes of each window
pub const MAX_LOOKAHEAD_OPTION: &str = "max_lookahead";

/// Feeder that resolves entities only when their surface form is coming up
pub struct LookupFeeder {
    records: Arc<Vec<EntityRecord>>,
    index: HashMap<String, Vec<usize>>,
    case_sensitive: bool,
    max_lookahead: Option<usize>,
    // aliases already fed, per open document
    sessions: Mutex<HashMap<DocumentId, HashSet<usize>>>,
}

impl LookupFeeder {
    /// Create a feeder over a fixed vocabulary
    pub fn new(records: Vec<EntityRecord>) -> Self {
        let mut feeder = Self {
            records: Arc::new(records),
            index: HashMap::new(),
            case_sensitive: false,
            max_lookahead: None,
            sessions: Mutex::new(HashMap::new()),
        };
        feeder.rebuild_index();
        feeder
    }

    /// Create a feeder over everything a feed delivers
    pub fn from_feed(feed: &EntityFeed) -> Result<Self, QueryError> {
        let mut records: Vec<EntityRecord> = Vec::new();
        feed.push(&mut records)?;
        Ok(Self::new(records))
    }

    /// Number of entities in the vocabulary
    pub fn vocabulary_len(&self) -> usize {
        self.records.len()
    }

    /// Number of documents with an open session
    pub fn open_sessions(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn key(&self, token: &str) -> String {
        if self.case_sensitive {
            token.to_string()
        } else {
            token.to_lowercase()
        }
    }

    fn rebuild_index(&mut self) {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, record) in self.records.iter().enumerate() {
            if let Some(first) = first_token(&record.alias_label) {
                index.entry(self.key(first)).or_default().push(position);
            }
        }
        self.index = index;
    }

    fn candidates(&self, window: &dyn LexemeWindow) -> Vec<usize> {
        let limit = self
            .max_lookahead
            .map_or(window.lexeme_count(), |max| max.min(window.lexeme_count()));

        (0..limit)
            .filter_map(|i| window.lexeme(i))
            .filter_map(|lexeme| self.index.get(&self.key(lexeme)))
            .flatten()
            .copied()
            .collect()
    }
}

/// First alphanumeric run of an alias, as a lexeme window would present it
fn first_token(alias: &str) -> Option<&str> {
    alias
        .split(|c: char| !c.is_alphanumeric())
        .find(|token| !token.is_empty())
}

impl DictionaryFeeder for LookupFeeder {
    fn init(&mut self, options: &HashMap<String, String>) {
        if let Some(value) = options.get(CASE_SENSITIVE_OPTION) {
            match value.parse::<bool>() {
                Ok(flag) => self.case_sensitive = flag,
                Err(_) => warn!("Ignoring {}={}: expected true or false", CASE_SENSITIVE_OPTION, value),
            }
        }
        if let Some(value) = options.get(MAX_LOOKAHEAD_OPTION) {
            match value.parse::<usize>() {
                Ok(max) if max > 0 => self.max_lookahead = Some(max),
                _ => warn!("Ignoring {}={}: expected a positive integer", MAX_LOOKAHEAD_OPTION, value),
            }
        }
        self.rebuild_index();
        debug!(
            "Lookup feeder indexed {} aliases over {} entities",
            self.index.len(),
            self.records.len()
        );
    }

    fn feed_all(&self, _listener: &mut dyn EntityListener) {}

    fn local_feed_init(&self, document: &Document) -> bool {
        if self.records.is_empty() {
            return false;
        }
        match self.sessions.lock() {
            Ok(mut sessions) => {
                sessions.insert(document.id(), HashSet::new());
                true
            }
            Err(_) => false,
        }
    }

    fn local_feed_needed(
        &self,
        document: &Document,
        window: &dyn LexemeWindow,
        listener: &mut dyn EntityListener,
    ) {
        if window.is_empty() {
            return;
        }
        let candidates = self.candidates(window);
        if candidates.is_empty() {
            return;
        }

        let fresh: Vec<usize> = {
            let Ok(mut sessions) = self.sessions.lock() else {
                return;
            };
            let Some(fed) = sessions.get_mut(&document.id()) else {
                return;
            };
            candidates.into_iter().filter(|&i| fed.insert(i)).collect()
        };

        for i in fresh {
            let record = &self.records[i];
            listener.add_entity(&record.instance_uri, &record.class_uri, &record.alias_label);
        }
    }

    fn local_feed_end(&self, document: &Document) {
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.remove(&document.id());
        }
    }
}
