//! Integration tests for feed resolution
//!
//! These tests run the resolver against real dictionary directories with no
//! knowledge service configured. Repositories are never contacted.

use lkb_domain::traits::{RepositoryConnection, RepositoryProvider};
use lkb_domain::{DictionaryLocation, EntityRecord, QueryError};
use lkb_feed::{fingerprint, FeedConfig, FeedKind, FeedResolver};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use url::Url;

struct RefusingProvider;

impl RepositoryProvider for RefusingProvider {
    fn open(&self, config_url: &Url) -> Result<Box<dyn RepositoryConnection>, QueryError> {
        Err(QueryError::Connection(format!(
            "{} refused the connection",
            config_url
        )))
    }
}

const CONFIG: &str = r#"
@prefix rep: <http://www.openrdf.org/config/repository#> .
@prefix hr: <http://www.openrdf.org/config/repository/http#> .

[] a rep:Repository ;
   rep:repositoryImpl [
      rep:repositoryType "openrdf:HTTPRepository" ;
      hr:repositoryURL <http://127.0.0.1:9/repositories/private>
   ] .
"#;

const QUERY: &str = "SELECT ?e ?c ?l\nWHERE {\n  ?e a ?c ;\n     <http://www.w3.org/2000/01/rdf-schema#label> ?l .\n}";

#[test]
fn test_empty_location_resolves_to_failing_feed() {
    let dir = TempDir::new().unwrap();
    let location = DictionaryLocation::new(dir.path());

    let feed = FeedResolver::from_config(&FeedConfig::default()).resolve(&location);
    assert_eq!(feed.kind(), FeedKind::Unavailable);
    assert_eq!(feed.fingerprint(), None);

    let mut records: Vec<EntityRecord> = Vec::new();
    let err = feed.push(&mut records).unwrap_err();
    assert_eq!(
        err,
        QueryError::ConfigurationMissing {
            path: dir.path().join("config.ttl")
        }
    );
    assert!(err
        .to_string()
        .contains(&dir.path().join("config.ttl").display().to_string()));
    assert!(records.is_empty());
}

#[test]
fn test_local_location_fingerprint_matches_hasher() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.ttl"), CONFIG).unwrap();
    fs::write(dir.path().join("query.txt"), QUERY).unwrap();
    let location = DictionaryLocation::new(dir.path());

    let feed = FeedResolver::from_config(&FeedConfig::default()).resolve(&location);
    assert_eq!(feed.kind(), FeedKind::LocalRepository);

    let expected = fingerprint(&location.config_url().unwrap(), QUERY);
    assert_eq!(feed.fingerprint(), Some(expected));
}

#[test]
fn test_reformatted_files_keep_fingerprint() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    fs::write(dir_a.path().join("config.ttl"), CONFIG).unwrap();
    fs::write(dir_a.path().join("query.txt"), QUERY).unwrap();
    fs::write(dir_b.path().join("config.ttl"), CONFIG.replace("\n   ", "\n\t")).unwrap();
    fs::write(dir_b.path().join("query.txt"), QUERY.replace('\n', " ")).unwrap();

    let resolver = FeedResolver::from_config(&FeedConfig::default());
    let a = resolver.resolve(&DictionaryLocation::new(dir_a.path()));
    let b = resolver.resolve(&DictionaryLocation::new(dir_b.path()));
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn test_local_feed_push_failure_is_propagated() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.ttl"), CONFIG).unwrap();
    fs::write(dir.path().join("query.txt"), QUERY).unwrap();

    let feed = FeedResolver::new(Arc::new(RefusingProvider))
        .resolve(&DictionaryLocation::new(dir.path()));
    assert_eq!(feed.kind(), FeedKind::LocalRepository);

    let mut records: Vec<EntityRecord> = Vec::new();
    assert!(matches!(
        feed.push(&mut records),
        Err(QueryError::Connection(_))
    ));
}
