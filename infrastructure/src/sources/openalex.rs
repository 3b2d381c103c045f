//! OpenAlex works search
//!
//! `GET /works?search=...&per-page=...&filter=has_abstract:true,from_publication_date:...`
//! with a `mailto:` user agent for the polite pool. OpenAlex stores
//! abstracts as inverted indexes (word → positions); they are rebuilt
//! into plain text here.

use super::http::{read_body, request_error};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;
use vte_application::{SourceError, SourceFetcher};
use vte_domain::{Document, SearchQuery, SourceCategory};

/// OpenAlex caps `per-page` at 200
const MAX_PER_PAGE: usize = 200;

pub struct OpenAlexFetcher {
    http: reqwest::Client,
    base_url: String,
    mailto: String,
    from_publication_date: String,
}

impl OpenAlexFetcher {
    pub const NAME: &'static str = "OpenAlex";

    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        mailto: impl Into<String>,
        from_publication_date: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            mailto: mailto.into(),
            from_publication_date: from_publication_date.into(),
        }
    }

    fn filter(&self) -> String {
        format!(
            "has_abstract:true,from_publication_date:{}",
            self.from_publication_date
        )
    }
}

#[derive(Debug, Deserialize)]
struct WorksPage {
    #[serde(default)]
    results: Vec<Work>,
}

#[derive(Debug, Deserialize)]
struct Work {
    id: Option<String>,
    title: Option<String>,
    doi: Option<String>,
    publication_year: Option<i32>,
    #[serde(default)]
    cited_by_count: u64,
    abstract_inverted_index: Option<HashMap<String, Vec<usize>>>,
    #[serde(default)]
    authorships: Vec<Authorship>,
}

#[derive(Debug, Deserialize)]
struct Authorship {
    author: Option<Author>,
}

#[derive(Debug, Deserialize)]
struct Author {
    display_name: Option<String>,
}

/// Rebuild abstract text from an inverted index.
pub(crate) fn reconstruct_abstract(index: &HashMap<String, Vec<usize>>) -> String {
    let mut positioned: Vec<(usize, &str)> = index
        .iter()
        .flat_map(|(word, positions)| positions.iter().map(move |p| (*p, word.as_str())))
        .collect();
    positioned.sort_unstable();
    positioned
        .into_iter()
        .map(|(_, word)| word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a works page. Records without a title or abstract are dropped.
fn parse_works(body: &str) -> Result<Vec<Document>, SourceError> {
    let page: WorksPage =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;

    Ok(page
        .results
        .into_iter()
        .filter_map(|work| {
            let title = work.title.filter(|t| !t.trim().is_empty())?;
            let abstract_text = work
                .abstract_inverted_index
                .as_ref()
                .map(reconstruct_abstract)
                .filter(|a| !a.is_empty())?;

            let mut doc = Document::new(title, abstract_text, OpenAlexFetcher::NAME)
                .with_citations(work.cited_by_count)
                .with_authors(
                    work.authorships
                        .into_iter()
                        .filter_map(|a| a.author.and_then(|a| a.display_name))
                        .collect(),
                );
            if let Some(url) = work.doi.clone().or_else(|| work.id.clone()) {
                doc = doc.with_url(url);
            }
            if let Some(id) = work.id {
                doc = doc.with_id(id);
            }
            if let Some(year) = work.publication_year {
                doc = doc.with_year(year);
            }
            Some(doc)
        })
        .collect())
}

#[async_trait]
impl SourceFetcher for OpenAlexFetcher {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> SourceCategory {
        SourceCategory::Article
    }

    async fn fetch(
        &self,
        query: &SearchQuery,
        max_results: usize,
    ) -> Result<Vec<Document>, SourceError> {
        if max_results == 0 {
            return Ok(Vec::new());
        }
        let per_page = max_results.min(MAX_PER_PAGE).to_string();
        let filter = self.filter();

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("search", query.text()),
                ("per-page", per_page.as_str()),
                ("filter", filter.as_str()),
            ])
            .header("User-Agent", format!("mailto:{}", self.mailto))
            .send()
            .await
            .map_err(request_error)?;

        let body = read_body(response).await?;
        let mut documents = parse_works(&body)?;
        documents.truncate(max_results);
        debug!("[OpenAlex] {} papers for {}", documents.len(), query);
        Ok(documents)
    }
}
