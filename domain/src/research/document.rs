//! Normalized research documents (papers, patents, news).

use serde::{Deserialize, Serialize};

/// Key used to detect repeated records within one fetch session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DedupKey(String);

impl DedupKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DedupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record returned by an external source, mapped to a common shape.
///
/// `id` uniqueness is defined by the source. Documents are only compared
/// within a single fetch session; no global uniqueness is implied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Display name of the source, e.g. "OpenAlex", "USPTO", "Tavily News"
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// Source-specific numeric identifier (patent number and the like)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<u64>,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            abstract_text: abstract_text.into(),
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_source_number(mut self, number: impl Into<String>) -> Self {
        self.source_number = Some(number.into());
        self
    }

    pub fn with_citations(mut self, citations: u64) -> Self {
        self.citations = Some(citations);
        self
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    /// Dedup key: the first non-empty of `id`, `url`, `source_number`,
    /// otherwise the JSON serialization of the whole record.
    ///
    /// The serialized fallback treats near-duplicates without identifiers
    /// as distinct records.
    pub fn dedup_key(&self) -> DedupKey {
        let present = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        if let Some(key) = present(&self.id)
            .or_else(|| present(&self.url))
            .or_else(|| present(&self.source_number))
        {
            return DedupKey(key);
        }

        // Field order of the derived Serialize impl is fixed, so this is stable.
        let fallback = serde_json::to_string(self)
            .unwrap_or_else(|_| format!("{}|{}|{}", self.source, self.title, self.abstract_text));
        DedupKey(fallback)
    }
}
