//! Integration tests for dictionary loading and feeding
//!
//! These tests drive feeds from a fake repository provider through the
//! loader and the SQLite cache, then feed documents through the host.

use lkb_domain::traits::{DictionaryCache, RepositoryConnection, RepositoryProvider};
use lkb_domain::{
    BindingSet, Document, EntityRecord, Fingerprint, QueryError, QueryLanguage, SliceWindow,
};
use lkb_feed::{EntityFeed, LocalRepositoryFeed, RemoteServiceFeed};
use lkb_feeder::{
    BulkFeeder, DictionaryLoader, EntityDictionary, FeederHost, LoadError, LoadOutcome,
    LookupFeeder,
};
use lkb_store::SqliteDictionaryCache;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use url::Url;

struct StaticConnection {
    rows: Result<Vec<BindingSet>, QueryError>,
}

impl RepositoryConnection for StaticConnection {
    fn evaluate(&self, _language: QueryLanguage, _query: &str) -> Result<Vec<BindingSet>, QueryError> {
        self.rows.clone()
    }
}

struct CountingProvider {
    rows: Result<Vec<BindingSet>, QueryError>,
    opened: AtomicUsize,
}

impl CountingProvider {
    fn new(rows: Result<Vec<BindingSet>, QueryError>) -> Arc<Self> {
        Arc::new(Self {
            rows,
            opened: AtomicUsize::new(0),
        })
    }

    fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl RepositoryProvider for CountingProvider {
    fn open(&self, _config_url: &Url) -> Result<Box<dyn RepositoryConnection>, QueryError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StaticConnection {
            rows: self.rows.clone(),
        }))
    }
}

fn row(instance: &str, class: &str, alias: &str) -> BindingSet {
    BindingSet::new()
        .with("E", instance)
        .with("C", class)
        .with("L", alias)
}

fn cities() -> Vec<BindingSet> {
    vec![
        row("urn:e:nyc", "urn:c:City", "New York"),
        row("urn:e:paris", "urn:c:City", "Paris"),
    ]
}

fn local_feed(provider: Arc<CountingProvider>, fingerprint: i32) -> EntityFeed {
    EntityFeed::Local(LocalRepositoryFeed::new(
        Url::parse("file:///dict/config.ttl").unwrap(),
        "SELECT ?E ?C ?L WHERE { ?E a ?C ; rdfs:label ?L }",
        Fingerprint::from_value(fingerprint),
        provider,
    ))
}

fn remote_feed(rows: Result<Vec<BindingSet>, QueryError>) -> EntityFeed {
    EntityFeed::Remote(RemoteServiceFeed::new(
        Box::new(StaticConnection { rows }),
        QueryLanguage::Serql,
        "select E, C, L from {E} sesame:directType {C}",
    ))
}

#[test]
fn test_local_feed_rebuilds_then_hits_cache() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("dictionary.db");
    let provider = CountingProvider::new(Ok(cities()));

    {
        let cache = SqliteDictionaryCache::new(&db_path).unwrap();
        let mut loader = DictionaryLoader::new(cache);
        let mut dict = EntityDictionary::new();
        let outcome = loader
            .load(&local_feed(Arc::clone(&provider), 11), &mut dict)
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Rebuilt { entities: 2 });
        assert_eq!(dict.lookup("Paris").len(), 1);
    }
    assert_eq!(provider.opened(), 1);

    let cache = SqliteDictionaryCache::new(&db_path).unwrap();
    let mut loader = DictionaryLoader::new(cache);
    let mut dict = EntityDictionary::new();
    let outcome = loader
        .load(&local_feed(Arc::clone(&provider), 11), &mut dict)
        .unwrap();

    assert_eq!(outcome, LoadOutcome::CacheHit { entities: 2 });
    assert_eq!(provider.opened(), 1);
    assert!(dict.contains_alias("New York"));
}

#[test]
fn test_changed_fingerprint_rebuilds() {
    let cache = SqliteDictionaryCache::new(":memory:").unwrap();
    let mut loader = DictionaryLoader::new(cache);
    let provider = CountingProvider::new(Ok(cities()));

    let mut dict = EntityDictionary::new();
    loader
        .load(&local_feed(Arc::clone(&provider), 1), &mut dict)
        .unwrap();
    let outcome = loader
        .load(&local_feed(Arc::clone(&provider), 2), &mut dict)
        .unwrap();

    assert!(matches!(outcome, LoadOutcome::Rebuilt { .. }));
    assert_eq!(provider.opened(), 2);
    assert_eq!(
        loader.cache().stored_fingerprint().unwrap(),
        Some(Fingerprint::from_value(2))
    );
}

#[test]
fn test_local_feed_failure_is_not_masked() {
    let mut cache = SqliteDictionaryCache::new(":memory:").unwrap();
    cache
        .store(
            Some(Fingerprint::from_value(1)),
            &[EntityRecord::new("urn:e:old", "urn:c:X", "Old")],
        )
        .unwrap();
    let mut loader = DictionaryLoader::new(cache);
    let provider = CountingProvider::new(Err(QueryError::Connection("refused".to_string())));

    let mut dict = EntityDictionary::new();
    let err = loader
        .load(&local_feed(provider, 2), &mut dict)
        .unwrap_err();

    assert!(matches!(err, LoadError::Query(QueryError::Connection(_))));
    assert!(dict.is_empty());
}

#[test]
fn test_remote_failure_falls_back_to_cache() {
    let mut cache = SqliteDictionaryCache::new(":memory:").unwrap();
    cache
        .store(None, &[EntityRecord::new("urn:e:old", "urn:c:X", "Old")])
        .unwrap();
    let mut loader = DictionaryLoader::new(cache);

    let mut dict = EntityDictionary::new();
    let outcome = loader
        .load(
            &remote_feed(Err(QueryError::Evaluation("timeout".to_string()))),
            &mut dict,
        )
        .unwrap();

    match outcome {
        LoadOutcome::CacheFallback { entities, error } => {
            assert_eq!(entities, 1);
            assert_eq!(error, QueryError::Evaluation("timeout".to_string()));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(dict.contains_alias("Old"));
}

#[test]
fn test_remote_feed_always_pushes() {
    let cache = SqliteDictionaryCache::new(":memory:").unwrap();
    let mut loader = DictionaryLoader::new(cache);

    let mut dict = EntityDictionary::new();
    let outcome = loader.load(&remote_feed(Ok(cities())), &mut dict).unwrap();
    assert_eq!(outcome, LoadOutcome::Rebuilt { entities: 2 });

    let cache = loader.into_cache();
    assert!(cache.is_populated().unwrap());
    assert_eq!(cache.stored_fingerprint().unwrap(), None);
}

#[test]
fn test_bulk_feeder_fills_global_dictionary() {
    let feeder = BulkFeeder::new(remote_feed(Ok(cities())));
    let host = FeederHost::new(feeder, &HashMap::new());

    let mut global = EntityDictionary::new();
    assert_eq!(host.load_global(&mut global), 2);
    assert!(host.begin_document(&Document::new("d", "")).is_none());
}

#[test]
fn test_lookup_feeder_from_feed_per_document() {
    let provider = CountingProvider::new(Ok(cities()));
    let feeder = LookupFeeder::from_feed(&local_feed(provider, 3)).unwrap();
    let host = FeederHost::new(feeder, &HashMap::new());

    let mut global = EntityDictionary::new();
    assert_eq!(host.load_global(&mut global), 0);

    let document = Document::new("travel", "From Paris to New York");
    let mut session = host.begin_document(&document).unwrap();
    let first = ["From", "Paris"];
    let second = ["Paris", "to", "New", "York"];

    assert_eq!(session.on_checkpoint(&SliceWindow::new(&first)).len(), 1);
    assert_eq!(session.on_checkpoint(&SliceWindow::new(&second)).len(), 1);
    assert_eq!(session.local_dictionary().len(), 2);
    session.finish();

    assert!(global.is_empty());
}

#[test]
fn test_lookup_feeder_from_failing_feed() {
    let provider = CountingProvider::new(Err(QueryError::Malformed {
        query: "SELECT".to_string(),
        message: "unexpected end".to_string(),
    }));
    let result = LookupFeeder::from_feed(&local_feed(provider, 3));
    assert!(matches!(result, Err(QueryError::Malformed { .. })));
}
