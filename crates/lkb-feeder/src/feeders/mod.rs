//! Built-in feeders

mod bulk;
mod lookup;

pub use bulk::BulkFeeder;
pub use lookup::{LookupFeeder, CASE_SENSITIVE_OPTION, MAX_LOOKAHEAD_OPTION};

use lkb_domain::traits::DictionaryFeeder;
use lkb_domain::{Document, EntityListener, LexemeWindow};
use std::collections::HashMap;

/// Feeder with no content at all
///
/// Stands in when a gazetteer is configured without an external feeder.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeeder;

impl DictionaryFeeder for NullFeeder {
    fn init(&mut self, _options: &HashMap<String, String>) {}

    fn feed_all(&self, _listener: &mut dyn EntityListener) {}

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityDictionary, FeederHost};

    #[test]
    fn test_null_feeder_feeds_nothing() {
        let host = FeederHost::new(NullFeeder, &HashMap::new());
        let mut global = EntityDictionary::new();

        assert_eq!(host.load_global(&mut global), 0);
        assert!(host.begin_document(&Document::new("d", "")).is_none());
    }
}
