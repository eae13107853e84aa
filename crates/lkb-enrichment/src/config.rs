//! Configuration for semantic enrichment

use crate::error::EnrichmentError;
use crate::template::QueryTemplate;
use serde::{Deserialize, Serialize};

/// Query used when none is configured: entertainers born in a place
/// located within the annotated entity
pub const DEFAULT_QUERY: &str = "SELECT ?Person WHERE { \
?Person <http://dbpedia.org/ontology/birthplace> ?BirthPlace . \
?BirthPlace <http://www.geonames.org/ontology#parentFeature> <%s> . \
?Person a <http://sw.opencyc.org/2008/06/10/concept/en/Entertainer> .} LIMIT 100";

/// Configuration for the enricher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Base URL of the Sesame/RDF4J server
    pub server: String,

    /// Repository queried for connections
    pub repository_id: String,

    /// Annotation set to enrich; `None` selects the default set
    #[serde(default)]
    pub input_set_name: Option<String>,

    /// Annotation types considered for enrichment
    #[serde(default = "default_annotation_types")]
    pub annotation_types: Vec<String>,

    /// Remove annotations whose query returns no rows
    #[serde(default = "default_delete_on_no_relations")]
    pub delete_on_no_relations: bool,

    /// SPARQL template with one `%s` placeholder for the entity URI
    ///
    /// Backslashes are stripped on load.
    #[serde(default = "default_query")]
    pub query: String,
}

fn default_annotation_types() -> Vec<String> {
    vec!["Lookup".to_string()]
}

fn default_delete_on_no_relations() -> bool {
    true
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

fn strip_backslashes(query: &str) -> String {
    query.replace('\\', "")
}

impl EnrichmentConfig {
    /// Configuration for a repository with every other setting at its default
    pub fn new(server: impl Into<String>, repository_id: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            repository_id: repository_id.into(),
            input_set_name: None,
            annotation_types: default_annotation_types(),
            delete_on_no_relations: default_delete_on_no_relations(),
            query: default_query(),
        }
    }

    /// Replace the query template
    ///
    /// Backslashes are stripped, so templates may be given with escaped
    /// quotes and angle brackets.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = strip_backslashes(query);
        self
    }

    /// Parse the configured query template
    pub fn template(&self) -> Result<QueryTemplate, EnrichmentError> {
        QueryTemplate::new(self.query.clone())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), EnrichmentError> {
        if self.server.trim().is_empty() {
            return Err(EnrichmentError::Config("server must not be empty".to_string()));
        }
        if self.repository_id.trim().is_empty() {
            return Err(EnrichmentError::Config(
                "repository_id must not be empty".to_string(),
            ));
        }
        if self.annotation_types.is_empty() {
            return Err(EnrichmentError::Config(
                "annotation_types must name at least one type".to_string(),
            ));
        }
        self.template().map(|_| ())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, EnrichmentError> {
        let mut config: Self = toml::from_str(toml_str)
            .map_err(|e| EnrichmentError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.query = strip_backslashes(&config.query);
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, EnrichmentError> {
        toml::to_string_pretty(self)
            .map_err(|e| EnrichmentError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config_is_valid() {
        let config = EnrichmentConfig::new("http://localhost:8080/openrdf-sesame", "dbpedia");
        assert!(config.validate().is_ok());
        assert_eq!(config.annotation_types, vec!["Lookup".to_string()]);
        assert!(config.delete_on_no_relations);
    }

    #[test]
    fn test_default_query_has_one_placeholder() {
        let template = QueryTemplate::new(DEFAULT_QUERY).unwrap();
        assert!(template.render("urn:x").contains("<urn:x>"));
        assert!(DEFAULT_QUERY.ends_with("LIMIT 100"));
    }

    #[test]
    fn test_with_query_strips_backslashes() {
        let config = EnrichmentConfig::new("http://s", "r")
            .with_query("SELECT ?x WHERE { ?x ?p \\<%s\\> }");
        assert_eq!(config.query, "SELECT ?x WHERE { ?x ?p <%s> }");
    }

    #[test]
    fn test_invalid_repository_id() {
        let config = EnrichmentConfig::new("http://s", " ");
        assert!(matches!(config.validate(), Err(EnrichmentError::Config(_))));
    }

    #[test]
    fn test_invalid_template() {
        let config = EnrichmentConfig::new("http://s", "r").with_query("<%s> %d");
        assert!(matches!(config.validate(), Err(EnrichmentError::Template(_))));
    }

    #[test]
    fn test_template_without_placeholder_is_valid() {
        let config = EnrichmentConfig::new("http://s", "r").with_query("SELECT * {}");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_query_strips_backslashes() {
        let config = EnrichmentConfig::from_toml(
            r#"
            server = "http://s"
            repository_id = "r"
            query = 'SELECT ?x WHERE { ?x ?p \<%s\> }'
            "#,
        )
        .unwrap();
        assert_eq!(config.query, "SELECT ?x WHERE { ?x ?p <%s> }");
    }

    #[test]
    fn test_toml_defaults() {
        let config = EnrichmentConfig::from_toml(
            r#"
            server = "http://localhost:8080/openrdf-sesame"
            repository_id = "dbpedia"
            input_set_name = "Semantic"
            "#,
        )
        .unwrap();

        assert_eq!(config.input_set_name.as_deref(), Some("Semantic"));
        assert_eq!(config.query, DEFAULT_QUERY);

        let parsed = EnrichmentConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
