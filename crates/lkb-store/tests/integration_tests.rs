//! Integration tests for lkb-store
//!
//! These tests verify the store/replay cycle of the compiled dictionary cache.

use lkb_domain::traits::DictionaryCache;
use lkb_domain::{EntityRecord, Fingerprint};
use lkb_store::SqliteDictionaryCache;
use tempfile::TempDir;

fn sample() -> Vec<EntityRecord> {
    vec![
        EntityRecord::new("urn:e:paris", "urn:c:City", "Paris"),
        EntityRecord::new("urn:e:paris", "urn:c:City", "City of Light"),
        EntityRecord::new("urn:e:paris-tx", "urn:c:City", "Paris"),
    ]
}

#[test]
fn test_store_and_replay() {
    let mut cache = SqliteDictionaryCache::new(":memory:").unwrap();
    cache.store(Some(Fingerprint::from_value(-17)), &sample()).unwrap();

    assert!(cache.is_populated().unwrap());
    assert_eq!(cache.stored_fingerprint().unwrap(), Some(Fingerprint::from_value(-17)));

    let mut replayed: Vec<EntityRecord> = Vec::new();
    assert_eq!(cache.replay(&mut replayed).unwrap(), 3);
    assert_eq!(replayed, sample());
}

#[test]
fn test_store_replaces_previous_dictionary() {
    let mut cache = SqliteDictionaryCache::new(":memory:").unwrap();
    cache.store(Some(Fingerprint::from_value(1)), &sample()).unwrap();
    cache
        .store(None, &[EntityRecord::new("urn:e:x", "urn:c:X", "X")])
        .unwrap();

    assert_eq!(cache.entity_count().unwrap(), 1);
    assert_eq!(cache.stored_fingerprint().unwrap(), None);
    assert!(cache.is_populated().unwrap());
}

#[test]
fn test_empty_dictionary_is_still_populated() {
    let mut cache = SqliteDictionaryCache::new(":memory:").unwrap();
    cache.store(Some(Fingerprint::from_value(5)), &[]).unwrap();

    assert!(cache.is_populated().unwrap());
    assert_eq!(cache.entity_count().unwrap(), 0);
}

#[test]
fn test_lookup_alias_keeps_duplicates() {
    let mut cache = SqliteDictionaryCache::new(":memory:").unwrap();
    cache.store(None, &sample()).unwrap();

    let hits = cache.lookup_alias("Paris").unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[1].instance_uri, "urn:e:paris-tx");
    assert!(cache.lookup_alias("Lyon").unwrap().is_empty());
}

#[test]
fn test_clear() {
    let mut cache = SqliteDictionaryCache::new(":memory:").unwrap();
    cache.store(Some(Fingerprint::from_value(9)), &sample()).unwrap();
    cache.clear().unwrap();

    assert!(!cache.is_populated().unwrap());
    assert_eq!(cache.stored_fingerprint().unwrap(), None);
}

#[test]
fn test_cache_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dictionary.cache.db");

    {
        let mut cache = SqliteDictionaryCache::new(&path).unwrap();
        cache.store(Some(Fingerprint::from_value(42)), &sample()).unwrap();
    }

    let cache = SqliteDictionaryCache::new(&path).unwrap();
    assert_eq!(cache.stored_fingerprint().unwrap(), Some(Fingerprint::from_value(42)));
    assert_eq!(cache.entity_count().unwrap(), 3);
}
