//! Enrich command implementation.

use crate::cli::EnrichArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{Formatter, Report};
use lkb_domain::{AnnotationSet, Document, FeatureMap, FeatureValue};
use lkb_enrichment::{EnrichmentReport, SemanticEnricher};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use tracing::warn;

/// Document exchanged with the enrich command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Document name
    pub name: String,
    /// Document text
    #[serde(default)]
    pub content: String,
    /// Annotations of the enriched set
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,
}

/// One annotation of a [`DocumentFile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationEntry {
    /// Annotation type
    #[serde(rename = "type")]
    pub kind: String,
    /// Start offset
    pub start: usize,
    /// End offset
    pub end: usize,
    /// Features; strings, integers and booleans are kept
    #[serde(default)]
    pub features: BTreeMap<String, serde_json::Value>,
}

impl DocumentFile {
    /// Build a document holding the annotations in the named set
    pub fn into_document(self, set_name: Option<&str>) -> Document {
        let mut document = Document::new(self.name, self.content);
        let set = document.annotations_mut(set_name);
        for entry in self.annotations {
            let features = entry
                .features
                .into_iter()
                .filter_map(|(name, value)| match to_feature(&value) {
                    Some(feature) => Some((name, feature)),
                    None => {
                        warn!("Dropping feature {} with unsupported value {}", name, value);
                        None
                    }
                })
                .collect::<FeatureMap>();
            set.add(entry.kind, entry.start, entry.end, features);
        }
        document
    }

    /// Capture a document's annotation set
    pub fn from_document(document: &Document, set_name: Option<&str>) -> Self {
        let annotations = document
            .annotations(set_name)
            .map(annotation_entries)
            .unwrap_or_default();
        Self {
            name: document.name().to_string(),
            content: document.content().to_string(),
            annotations,
        }
    }
}

fn annotation_entries(set: &AnnotationSet) -> Vec<AnnotationEntry> {
    set.iter()
        .map(|a| AnnotationEntry {
            kind: a.kind.clone(),
            start: a.start,
            end: a.end,
            features: a
                .features
                .iter()
                .map(|(name, value)| (name.clone(), from_feature(value)))
                .collect(),
        })
        .collect()
}

fn to_feature(value: &serde_json::Value) -> Option<FeatureValue> {
    match value {
        serde_json::Value::String(s) => Some(FeatureValue::Text(s.clone())),
        serde_json::Value::Bool(b) => Some(FeatureValue::Boolean(*b)),
        serde_json::Value::Number(n) => n.as_i64().map(FeatureValue::Integer),
        _ => None,
    }
}

fn from_feature(value: &FeatureValue) -> serde_json::Value {
    match value {
        FeatureValue::Text(s) => serde_json::Value::String(s.clone()),
        FeatureValue::Integer(i) => serde_json::Value::from(*i),
        FeatureValue::Boolean(b) => serde_json::Value::Bool(*b),
    }
}

/// Summary of an enrich run.
#[derive(Debug, Serialize)]
pub struct EnrichSummary {
    /// Document name
    pub document: String,
    /// Counts from the enricher
    #[serde(flatten)]
    pub report: EnrichmentReport,
    /// Where the enriched document went
    pub output: String,
}

impl Report for EnrichSummary {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Document", self.document.clone()),
            ("Enriched", self.report.enriched.to_string()),
            ("Removed", self.report.removed.to_string()),
            ("Failed", self.report.failed.to_string()),
            ("Skipped", self.report.skipped.to_string()),
            ("Output", self.output.clone()),
        ]
    }
}

/// Execute the enrich command.
pub fn execute_enrich(args: EnrichArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let enrichment = config.enrichment.clone().ok_or_else(|| {
        CliError::Config("an [enrichment] section is required for enrich".to_string())
    })?;
    let set_name = enrichment.input_set_name.clone();
    let enricher = SemanticEnricher::from_config(enrichment, config.feed.http_timeout())?;

    let input: DocumentFile = serde_json::from_str(&fs::read_to_string(&args.input)?)?;
    let mut document = input.into_document(set_name.as_deref());
    let report = enricher.execute(&mut document)?;

    let enriched = serde_json::to_string_pretty(&DocumentFile::from_document(
        &document,
        set_name.as_deref(),
    ))?;
    let output = match &args.output {
        Some(path) => {
            fs::write(path, enriched)?;
            path.display().to_string()
        }
        None => {
            println!("{}", enriched);
            "stdout".to_string()
        }
    };

    let summary = EnrichSummary {
        document: document.name().to_string(),
        report,
        output,
    };
    if args.output.is_some() {
        println!("{}", formatter.format_report(&summary)?);
    } else {
        eprintln!("{}", formatter.format_report(&summary)?);
    }
    Ok(())
}
