//! Per-annotation enrichment against a graph repository

use crate::config::EnrichmentConfig;
use crate::error::EnrichmentError;
use crate::template::QueryTemplate;
use lkb_domain::annotation::CONNECTIONS_FEATURE;
use lkb_domain::traits::{RepositoryConnection, RepositoryConnector};
use lkb_domain::{AnnotationId, AnnotationSet, BindingSet, Document, QueryError, QueryLanguage};
use lkb_feed::SparqlHttpRepository;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What one enrichment pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentReport {
    /// Annotations that received a `connections` feature
    pub enriched: usize,
    /// Annotations removed for having no relations
    pub removed: usize,
    /// Annotations whose query failed; left untouched
    pub failed: usize,
    /// Annotations of a matching type without a textual `inst` feature
    pub skipped: usize,
}

/// Adds knowledge-graph connections to semantic annotations
///
/// For every annotation of a configured type that names an entity in its
/// `inst` feature, the query template is rendered with the entity URI and
/// evaluated. Every bound value of every result row is written to the
/// `connections` feature, each followed by a comma.
pub struct SemanticEnricher {
    config: EnrichmentConfig,
    template: QueryTemplate,
    annotation_types: HashSet<String>,
    connector: Arc<dyn RepositoryConnector>,
}

impl SemanticEnricher {
    /// Create an enricher over any repository connector
    pub fn new(
        config: EnrichmentConfig,
        connector: Arc<dyn RepositoryConnector>,
    ) -> Result<Self, EnrichmentError> {
        let template = config.template()?;
        let annotation_types = config.annotation_types.iter().cloned().collect();
        Ok(Self {
            config,
            template,
            annotation_types,
            connector,
        })
    }

    /// Create an enricher talking to the configured Sesame/RDF4J repository
    pub fn from_config(config: EnrichmentConfig, timeout: Duration) -> Result<Self, EnrichmentError> {
        config.validate()?;
        let repository =
            SparqlHttpRepository::for_server(&config.server, &config.repository_id, timeout)
                .map_err(EnrichmentError::Connection)?;
        Self::new(config, Arc::new(repository))
    }

    /// The active configuration
    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Enrich the configured annotation set of a document
    ///
    /// One connection is used for the whole document and released before
    /// returning.
    pub fn execute(&self, document: &mut Document) -> Result<EnrichmentReport, EnrichmentError> {
        let set_name = self.config.input_set_name.as_deref();
        if document.annotations(set_name).is_none() {
            debug!("{} has no annotation set {:?}", document.name(), set_name);
            return Ok(EnrichmentReport::default());
        }

        let connection = self
            .connector
            .connect()
            .map_err(EnrichmentError::Connection)?;

        let name = document.name().to_string();
        let report = self.enrich_set(document.annotations_mut(set_name), connection.as_ref());
        info!(
            "Enriched {}: {} enriched, {} removed, {} failed, {} skipped",
            name, report.enriched, report.removed, report.failed, report.skipped
        );
        Ok(report)
    }

    /// Enrich one annotation set over an open connection
    pub fn enrich_set(
        &self,
        set: &mut AnnotationSet,
        connection: &dyn RepositoryConnection,
    ) -> EnrichmentReport {
        let mut report = EnrichmentReport::default();
        let mut without_relations: Vec<AnnotationId> = Vec::new();

        for id in set.ids_of_kinds(&self.annotation_types) {
            let Some(annotation) = set.get_mut(id) else {
                continue;
            };
            let Some(entity) = annotation.instance_uri().map(str::to_string) else {
                report.skipped += 1;
                continue;
            };

            let query = self.template.render(&entity);
            match connection.evaluate(QueryLanguage::Sparql, &query) {
                Ok(rows) => {
                    if rows.is_empty() && self.config.delete_on_no_relations {
                        without_relations.push(id);
                    }
                    let connections = join_values(&rows);
                    if !connections.is_empty() {
                        annotation
                            .features
                            .insert(CONNECTIONS_FEATURE.to_string(), connections.into());
                        report.enriched += 1;
                    }
                }
                Err(QueryError::Malformed { message, .. }) => {
                    warn!(
                        "Created invalid query [{}] for entity [{}]. Parser reported: {}",
                        query, entity, message
                    );
                    report.failed += 1;
                }
                Err(e) => {
                    warn!("Error executing query [{}] for entity [{}]: {}", query, entity, e);
                    report.failed += 1;
                }
            }
        }

        if self.config.delete_on_no_relations {
            report.removed = set.remove_all(without_relations);
        }
        report
    }
}

/// Every bound value of every row, each followed by a comma
fn join_values(rows: &[BindingSet]) -> String {
    let mut joined = String::new();
    for value in rows.iter().flat_map(|row| row.values()) {
        joined.push_str(value);
        joined.push(',');
    }
    joined
}
