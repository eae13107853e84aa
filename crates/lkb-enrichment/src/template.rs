//! Graph-pattern query template with a single entity placeholder

use crate::error::EnrichmentError;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Entity,
}

/// Query text with at most one `%s` placeholder for the entity URI
///
/// `%%` stands for a literal percent sign; any other `%` sequence, or a
/// second placeholder, is rejected when the template is built. A template
/// without a placeholder renders the same query for every entity.
///
/// # Examples
///
/// ```
/// use lkb_enrichment::QueryTemplate;
///
/// let template = QueryTemplate::new("SELECT ?p WHERE { ?p ?r <%s> } # 100%%").unwrap();
/// assert_eq!(
///     template.render("urn:e:1"),
///     "SELECT ?p WHERE { ?p ?r <urn:e:1> } # 100%"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl QueryTemplate {
    /// Parse a template
    pub fn new(source: impl Into<String>) -> Result<Self, EnrichmentError> {
        let source = source.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut placeholders = 0;

        let mut chars = source.chars().enumerate();
        while let Some((position, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            match chars.next() {
                Some((_, '%')) => literal.push('%'),
                Some((_, 's')) => {
                    placeholders += 1;
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    segments.push(Segment::Entity);
                }
                Some((_, other)) => {
                    return Err(EnrichmentError::Template(format!(
                        "unsupported format sequence '%{}' at {}",
                        other, position
                    )))
                }
                None => {
                    return Err(EnrichmentError::Template(
                        "dangling '%' at end of template".to_string(),
                    ))
                }
            }
        }
        segments.push(Segment::Literal(literal));

        match placeholders {
            0 => warn!("Query template has no %s placeholder; every entity gets the same query"),
            1 => {}
            n => {
                return Err(EnrichmentError::Template(format!(
                    "expected at most one %s placeholder, found {}",
                    n
                )))
            }
        }
        Ok(Self { source, segments })
    }

    /// Template text as given
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute the entity URI
    pub fn render(&self, entity_uri: &str) -> String {
        let mut query = String::with_capacity(self.source.len() + entity_uri.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => query.push_str(text),
                Segment::Entity => query.push_str(entity_uri),
            }
        }
        query
    }
}
