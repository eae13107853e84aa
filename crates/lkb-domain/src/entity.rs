//! Entity records and the listener they are streamed through

use std::fmt;

/// One textual surface form of one knowledge-base individual
///
/// Several records may share an instance URI (multiple aliases or multiple
/// asserted classes). Deduplication is left to whoever builds the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRecord {
    /// URI of the individual
    pub instance_uri: String,

    /// URI of the individual's class
    pub class_uri: String,

    /// One alias label of the individual
    pub alias_label: String,
}

impl EntityRecord {
    /// Create a new entity record
    ///
    /// # Examples
    ///
    /// ```
    /// use lkb_domain::EntityRecord;
    ///
    /// let record = EntityRecord::new("urn:e:paris", "urn:c:City", "Paris");
    /// assert_eq!(record.alias_label, "Paris");
    /// ```
    pub fn new(
        instance_uri: impl Into<String>,
        class_uri: impl Into<String>,
        alias_label: impl Into<String>,
    ) -> Self {
        Self {
            instance_uri: instance_uri.into(),
            class_uri: class_uri.into(),
            alias_label: alias_label.into(),
        }
    }
}

impl fmt::Display for EntityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] <{}>", self.alias_label, self.class_uri, self.instance_uri)
    }
}

/// Entry point for passing entity data into a dictionary
pub trait EntityListener {
    /// Pass one entity to the dictionary
    fn add_entity(&mut self, instance_uri: &str, class_uri: &str, alias_label: &str);
}

impl EntityListener for Vec<EntityRecord> {
    fn add_entity(&mut self, instance_uri: &str, class_uri: &str, alias_label: &str) {
        self.push(EntityRecord::new(instance_uri, class_uri, alias_label));
    }
}
