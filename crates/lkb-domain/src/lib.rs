//! LKB Domain Layer
//!
//! Core value types and trait seams for the lexical knowledge base pipeline:
//! where a gazetteer's entities come from, how they are streamed into a
//! dictionary, and how recognized entities are enriched from a knowledge graph.
//!
//! ## Key Concepts
//!
//! - **EntityRecord**: one surface form (alias) of one knowledge-base individual
//! - **Fingerprint**: whitespace-insensitive cache-validity token
//! - **DictionaryLocation**: a gazetteer's private resource directory
//! - **LexemeWindow**: the host parser's pending lookahead tokens
//! - **Annotations**: the host document model the enrichment engine mutates
//!
//! ## Architecture
//!
//! This crate performs no I/O. Repository clients, caches and feeders live in
//! the other crates and plug in through the traits in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod annotation;
pub mod document;
pub mod entity;
pub mod fingerprint;
pub mod lexeme;
pub mod location;
pub mod query;
pub mod traits;

// Re-exports for convenience
pub use annotation::{Annotation, AnnotationId, AnnotationSet, FeatureMap, FeatureValue};
pub use document::{Document, DocumentId};
pub use entity::{EntityListener, EntityRecord};
pub use fingerprint::Fingerprint;
pub use lexeme::{LexemeWindow, SliceWindow};
pub use location::DictionaryLocation;
pub use query::{BindingSet, QueryError, QueryLanguage, RegistryError, ServiceError};
