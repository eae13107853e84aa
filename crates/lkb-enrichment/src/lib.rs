//! LKB Semantic Enrichment
//!
//! Adds data from an external knowledge graph to semantic annotations.
//!
//! # Overview
//!
//! A semantic annotation is one whose `inst` feature holds the URI of a
//! knowledge-base entity. For each such annotation of a configured type, the
//! enricher runs a templated SPARQL query against a repository and stores a
//! comma-terminated list of every value in the results in the annotation's
//! `connections` feature. Annotations whose query returns nothing are
//! removed, unless that is disabled.
//!
//! Query failures affect only the annotation that produced them: they are
//! logged and the annotation is left as it was.
//!
//! # Example Usage
//!
//! ```no_run
//! use lkb_domain::{Document, FeatureMap};
//! use lkb_enrichment::{EnrichmentConfig, SemanticEnricher};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EnrichmentConfig::new("http://localhost:8080/openrdf-sesame", "dbpedia");
//! let enricher = SemanticEnricher::from_config(config, Duration::from_secs(30))?;
//!
//! let mut document = Document::new("news", "Concert in Paris");
//! let mut features = FeatureMap::new();
//! features.insert("inst".to_string(), "http://sws.geonames.org/2988507/".into());
//! document.annotations_mut(None).add("Lookup", 11, 16, features);
//!
//! let report = enricher.execute(&mut document)?;
//! println!("{} enriched, {} removed", report.enriched, report.removed);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod enricher;
mod error;
mod template;

pub use config::{EnrichmentConfig, DEFAULT_QUERY};
pub use enricher::{EnrichmentReport, SemanticEnricher};
pub use error::EnrichmentError;
pub use template::QueryTemplate;
