//! PatentsView (USPTO) patent search
//!
//! `POST /api/v1/patent/` with an `X-Api-Key` header. The boolean query
//! strings built by the query synthesizer are translated into the
//! PatentsView JSON query language: every term becomes a `_text_phrase`
//! match on title or abstract, OR-groups become `_or`, and AND-joined
//! groups become `_and`.

use super::http::{read_body, request_error};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::LazyLock;
use tracing::debug;
use vte_application::{SourceError, SourceFetcher};
use vte_domain::{Document, SearchQuery, SourceCategory};

static AND_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+AND\s+").expect("static regex is valid"));
static OR_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+OR\s+").expect("static regex is valid"));
static OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:AND|OR)\b").expect("static regex is valid"));
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[()"*]"#).expect("static regex is valid"));

const FIELDS: [&str; 4] = ["patent_id", "patent_title", "patent_abstract", "patent_date"];

/// PatentsView caps page size at 1000
const MAX_SIZE: usize = 1000;

/// `{"_or": [title phrase, abstract phrase]}` for one term
fn term_condition(term: &str) -> Value {
    json!({
        "_or": [
            {"_text_phrase": {"patent_title": term}},
            {"_text_phrase": {"patent_abstract": term}}
        ]
    })
}

fn clean(term: &str) -> String {
    PUNCTUATION.replace_all(term, "").trim().to_string()
}

/// Translate `(a OR b) AND "c d"` into a PatentsView `q` object.
///
/// A query without operators becomes a single phrase condition. Returns
/// `None` when no term survives cleaning.
pub fn boolean_query_to_patentsview(query: &str) -> Option<Value> {
    if !OPERATOR.is_match(query) {
        let term = clean(query);
        return (!term.is_empty()).then(|| term_condition(&term));
    }

    let mut and_conditions: Vec<Value> = AND_SPLIT
        .split(query.trim())
        .filter_map(|group| {
            let mut or_conditions: Vec<Value> = OR_SPLIT
                .split(group)
                .map(clean)
                .filter(|term| !term.is_empty())
                .map(|term| term_condition(&term))
                .collect();
            match or_conditions.len() {
                0 => None,
                1 => or_conditions.pop(),
                _ => Some(json!({ "_or": or_conditions })),
            }
        })
        .collect();

    match and_conditions.len() {
        0 => None,
        1 => and_conditions.pop(),
        _ => Some(json!({ "_and": and_conditions })),
    }
}

pub struct PatentsViewFetcher {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl PatentsViewFetcher {
    pub const NAME: &'static str = "USPTO";

    /// `api_key_env` is only used to name the missing variable in errors.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        api_key_env: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
            api_key_env: api_key_env.into(),
        }
    }

    fn request_body(q: Value, size: usize) -> Value {
        json!({
            "q": q,
            "f": FIELDS,
            "o": {"size": size.min(MAX_SIZE)}
        })
    }
}

#[derive(Debug, Deserialize)]
struct PatentsPage {
    #[serde(default)]
    patents: Option<Vec<Patent>>,
}

#[derive(Debug, Deserialize)]
struct Patent {
    patent_id: Option<String>,
    patent_title: Option<String>,
    patent_abstract: Option<String>,
    patent_date: Option<String>,
}

fn parse_patents(body: &str) -> Result<Vec<Document>, SourceError> {
    let page: PatentsPage =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;

    Ok(page
        .patents
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| {
            let title = p.patent_title.filter(|t| !t.trim().is_empty())?;
            let mut doc = Document::new(
                title,
                p.patent_abstract.unwrap_or_default(),
                PatentsViewFetcher::NAME,
            );
            if let Some(number) = p.patent_id {
                doc = doc.with_source_number(number);
            }
            if let Some(year) = p
                .patent_date
                .as_deref()
                .and_then(|d| d.get(..4))
                .and_then(|y| y.parse().ok())
            {
                doc = doc.with_year(year);
            }
            Some(doc)
        })
        .collect())
}

#[async_trait]
impl SourceFetcher for PatentsViewFetcher {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> SourceCategory {
        SourceCategory::Patent
    }

    fn check_available(&self) -> Result<(), SourceError> {
        match &self.api_key {
            Some(_) => Ok(()),
            None => Err(SourceError::MissingApiKey(self.api_key_env.clone())),
        }
    }

    async fn fetch(
        &self,
        query: &SearchQuery,
        max_results: usize,
    ) -> Result<Vec<Document>, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SourceError::MissingApiKey(self.api_key_env.clone()))?;
        if max_results == 0 {
            return Ok(Vec::new());
        }
        let Some(q) = boolean_query_to_patentsview(query.text()) else {
            return Ok(Vec::new());
        };

        let response = self
            .http
            .post(&self.base_url)
            .header("X-Api-Key", api_key)
            .json(&Self::request_body(q, max_results))
            .send()
            .await
            .map_err(request_error)?;

        let body = read_body(response).await?;
        let mut documents = parse_patents(&body)?;
        documents.truncate(max_results);
        debug!("[USPTO] {} patents for {}", documents.len(), query);
        Ok(documents)
    }
}
