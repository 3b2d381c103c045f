//! Knowledge store entries derived from documents.

use super::expert::ExpertId;
use crate::research::document::Document;
use serde::{Deserialize, Serialize};

/// Coarse classification of a document's source, used for partition stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    Article,
    Patent,
    News,
}

impl SourceCategory {
    /// Classify by the `source` metadata value.
    ///
    /// Unknown sources count as articles.
    pub fn from_source(source: &str) -> Self {
        let source = source.to_lowercase();
        if source.contains("openalex") {
            SourceCategory::Article
        } else if source.contains("uspto") || source.contains("epo") || source.contains("patent") {
            SourceCategory::Patent
        } else if source.contains("tavily") || source.contains("news") {
            SourceCategory::News
        } else {
            SourceCategory::Article
        }
    }
}

/// Metadata stored alongside each entry. Filtering is always an exact
/// match on `expert_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub source: String,
    pub expert_id: ExpertId,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_id: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub citations: u64,
}

/// A content string plus metadata, ready for bulk insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub content: String,
    pub metadata: EntryMetadata,
}

impl KnowledgeEntry {
    /// Build an entry from a document: `Title / Abstract / Year` text and
    /// the partition tags.
    pub fn from_document(doc: &Document, expert_id: &ExpertId, topic: &str) -> Self {
        let year = doc
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let content = format!(
            "Title: {}\nAbstract: {}\nYear: {}",
            doc.title, doc.abstract_text, year
        );

        Self {
            content,
            metadata: EntryMetadata {
                source: doc.source.clone(),
                expert_id: expert_id.clone(),
                topic: topic.to_string(),
                paper_id: doc.id.clone().or_else(|| doc.source_number.clone()),
                year: doc.year,
                citations: doc.citations.unwrap_or(0),
            },
        }
    }
}

/// A ranked retrieval result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub content: String,
    pub metadata: EntryMetadata,
    pub score: f32,
}
