//! Annotation model - the slice of the host document model that enrichment touches
//!
//! Annotations are owned by their set. Consumers may change features and
//! remove annotations, but ids are only ever handed out by [`AnnotationSet::add`].

use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Feature holding the URI of the entity an annotation denotes
pub const INST_FEATURE: &str = "inst";

/// Feature written by enrichment with comma-terminated query results
pub const CONNECTIONS_FEATURE: &str = "connections";

/// Identifier of an annotation, unique within its set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnnotationId(u64);

impl AnnotationId {
    /// Get the raw id
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value of an annotation feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureValue {
    /// Text value (URIs are stored as text)
    Text(String),
    /// Integer value
    Integer(i64),
    /// Boolean value
    Boolean(bool),
}

impl FeatureValue {
    /// The text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Text(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Integer(value)
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Boolean(value)
    }
}

/// Ordered feature map of an annotation
pub type FeatureMap = BTreeMap<String, FeatureValue>;

/// A typed span of a document with features
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Identifier within the owning set
    pub id: AnnotationId,

    /// Annotation type (e.g. "Lookup")
    pub kind: String,

    /// Start offset in the document content
    pub start: usize,

    /// End offset in the document content
    pub end: usize,

    /// Features of the annotation
    pub features: FeatureMap,
}

impl Annotation {
    /// The `inst` feature, if present and textual
    pub fn instance_uri(&self) -> Option<&str> {
        self.features.get(INST_FEATURE).and_then(FeatureValue::as_text)
    }
}

/// Set of annotations over one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSet {
    annotations: BTreeMap<AnnotationId, Annotation>,
    next_id: u64,
}

impl AnnotationSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an annotation and return its id
    ///
    /// # Examples
    ///
    /// ```
    /// use lkb_domain::{AnnotationSet, FeatureMap};
    ///
    /// let mut set = AnnotationSet::new();
    /// let id = set.add("Lookup", 0, 5, FeatureMap::new());
    /// assert_eq!(set.get(id).unwrap().kind, "Lookup");
    /// ```
    pub fn add(
        &mut self,
        kind: impl Into<String>,
        start: usize,
        end: usize,
        features: FeatureMap,
    ) -> AnnotationId {
        let id = AnnotationId(self.next_id);
        self.next_id += 1;
        self.annotations.insert(
            id,
            Annotation {
                id,
                kind: kind.into(),
                start,
                end,
                features,
            },
        );
        id
    }

    /// Get an annotation by id
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(&id)
    }

    /// Get an annotation by id for feature updates
    pub fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.get_mut(&id)
    }

    /// Whether the set still holds the given annotation
    pub fn contains(&self, id: AnnotationId) -> bool {
        self.annotations.contains_key(&id)
    }

    /// Ids of all annotations whose type is in `kinds`, in id order
    pub fn ids_of_kinds(&self, kinds: &HashSet<String>) -> Vec<AnnotationId> {
        self.annotations
            .values()
            .filter(|a| kinds.contains(&a.kind))
            .map(|a| a.id)
            .collect()
    }

    /// Remove one annotation
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        self.annotations.remove(&id)
    }

    /// Remove every listed annotation; returns how many were present
    pub fn remove_all<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = AnnotationId>,
    {
        ids.into_iter()
            .filter(|id| self.annotations.remove(id).is_some())
            .count()
    }

    /// Iterate over annotations in id order
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.values()
    }

    /// Number of annotations
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(set: &mut AnnotationSet, uri: &str) -> AnnotationId {
        let mut features = FeatureMap::new();
        features.insert(INST_FEATURE.to_string(), uri.into());
        set.add("Lookup", 0, 1, features)
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut set = AnnotationSet::new();
        let a = lookup(&mut set, "urn:a");
        let b = lookup(&mut set, "urn:b");
        assert!(a < b);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_ids_of_kinds() {
        let mut set = AnnotationSet::new();
        let a = lookup(&mut set, "urn:a");
        set.add("Token", 0, 1, FeatureMap::new());

        let kinds: HashSet<String> = ["Lookup".to_string()].into_iter().collect();
        assert_eq!(set.ids_of_kinds(&kinds), vec![a]);
    }

    #[test]
    fn test_instance_uri_requires_text() {
        let mut set = AnnotationSet::new();
        let mut features = FeatureMap::new();
        features.insert(INST_FEATURE.to_string(), FeatureValue::Integer(7));
        let id = set.add("Lookup", 0, 1, features);
        assert_eq!(set.get(id).unwrap().instance_uri(), None);

        let id = lookup(&mut set, "urn:x");
        assert_eq!(set.get(id).unwrap().instance_uri(), Some("urn:x"));
    }

    #[test]
    fn test_remove_all_counts_present() {
        let mut set = AnnotationSet::new();
        let a = lookup(&mut set, "urn:a");
        let b = lookup(&mut set, "urn:b");
        set.remove(a);

        assert_eq!(set.remove_all([a, b]), 1);
        assert!(set.is_empty());
    }
}
