//! In-memory entity dictionary keyed by alias

use lkb_domain::{EntityListener, EntityRecord};
use std::collections::HashMap;

/// Alias → entities map filled through [`EntityListener`]
///
/// This is the sink the matching automaton is built from; it keeps every
/// record it receives, duplicates included.
#[derive(Debug, Clone, Default)]
pub struct EntityDictionary {
    by_alias: HashMap<String, Vec<EntityRecord>>,
    len: usize,
}

impl EntityDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities with exactly this alias
    pub fn lookup(&self, alias: &str) -> &[EntityRecord] {
        self.by_alias.get(alias).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any entity has this alias
    pub fn contains_alias(&self, alias: &str) -> bool {
        self.by_alias.contains_key(alias)
    }

    /// Number of distinct aliases
    pub fn alias_count(&self) -> usize {
        self.by_alias.len()
    }

    /// Number of records received
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no record was received
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over every record, grouped by alias
    pub fn records(&self) -> impl Iterator<Item = &EntityRecord> {
        self.by_alias.values().flatten()
    }
}

impl EntityListener for EntityDictionary {
    fn add_entity(&mut self, instance_uri: &str, class_uri: &str, alias_label: &str) {
        self.by_alias
            .entry(alias_label.to_string())
            .or_default()
            .push(EntityRecord::new(instance_uri, class_uri, alias_label));
        self.len += 1;
    }
}
