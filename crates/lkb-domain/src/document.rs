//! Minimal host document: content plus default and named annotation sets

use crate::annotation::AnnotationSet;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique document identifier
///
/// Feeders key their per-document state on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Allocate a fresh id
    pub fn new() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc-{}", self.0)
    }
}

/// A document being processed by the host runtime
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    name: String,
    content: String,
    default_set: AnnotationSet,
    named_sets: HashMap<String, AnnotationSet>,
}

impl Document {
    /// Create a document with empty annotation sets
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.into(),
            content: content.into(),
            default_set: AnnotationSet::new(),
            named_sets: HashMap::new(),
        }
    }

    /// Document id
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Document name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Document text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Annotation set by name; `None` selects the default set
    pub fn annotations(&self, set_name: Option<&str>) -> Option<&AnnotationSet> {
        match set_name {
            None | Some("") => Some(&self.default_set),
            Some(name) => self.named_sets.get(name),
        }
    }

    /// Mutable annotation set by name, created on first use
    pub fn annotations_mut(&mut self, set_name: Option<&str>) -> &mut AnnotationSet {
        match set_name {
            None | Some("") => &mut self.default_set,
            Some(name) => self.named_sets.entry(name.to_string()).or_default(),
        }
    }
}
