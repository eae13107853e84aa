//! LKB Feed Layer
//!
//! Decides where a gazetteer's entity data comes from and streams it.
//!
//! # Architecture
//!
//! ```text
//! FeedResolver ─┬─ knowledge service reachable? ──> RemoteServiceFeed
//!               ├─ query.txt + config.ttl?     ──> LocalRepositoryFeed (+ Fingerprint)
//!               └─ otherwise                   ──> UnavailableFeed (fails only on push)
//! ```
//!
//! The resolver never fails; unavailability of a tier only moves it on to the
//! next one. Failures while pushing are always propagated to the caller.
//!
//! # Examples
//!
//! ```no_run
//! use lkb_domain::{DictionaryLocation, EntityRecord};
//! use lkb_feed::{FeedConfig, FeedResolver};
//!
//! let resolver = FeedResolver::from_config(&FeedConfig::default());
//! let feed = resolver.resolve(&DictionaryLocation::new("dictionaries/cities"));
//!
//! let mut records: Vec<EntityRecord> = Vec::new();
//! feed.push(&mut records).unwrap();
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod feed;
pub mod hasher;
pub mod provider;
pub mod resolver;
pub mod service;
pub mod sparql;
pub mod trusted;

pub use config::{ConfigError, FeedConfig, ServiceConfig};
pub use feed::{EntityFeed, FeedKind, LocalRepositoryFeed, RemoteServiceFeed, UnavailableFeed};
pub use hasher::{collapse_whitespace, fingerprint, string_hash};
pub use provider::ConfigRepositoryProvider;
pub use resolver::FeedResolver;
pub use service::HttpKnowledgeService;
pub use sparql::{SparqlHttpConnection, SparqlHttpRepository};
pub use trusted::{TrustedEntities, FALLBACK_ENTITY_QUERY};
