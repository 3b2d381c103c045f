//! Tavily news search
//!
//! `POST /search` with `search_depth = "advanced"`. The snippet content
//! serves as the document abstract; results carry no reliable year.

use super::http::{read_body, request_error};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vte_application::{SourceError, SourceFetcher};
use vte_domain::{Document, SearchQuery, SourceCategory};

/// Tavily caps `max_results` at 20
const MAX_RESULTS: usize = 20;

pub struct TavilyNewsFetcher {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'static str,
    max_results: usize,
    include_answer: bool,
    include_raw_content: bool,
    include_images: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    title: Option<String>,
    url: Option<String>,
    content: Option<String>,
}

impl TavilyNewsFetcher {
    pub const NAME: &'static str = "Tavily News";

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
}

fn parse_results(body: &str) -> Result<Vec<Document>, SourceError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;
    Ok(response
        .results
        .into_iter()
        .filter_map(|r| {
            let title = r.title.filter(|t| !t.trim().is_empty())?;
            let doc = Document::new(title, r.content.unwrap_or_default(), TavilyNewsFetcher::NAME);
            Some(match r.url {
                Some(url) => doc.with_url(url),
                None => doc,
            })
        })
        .collect())
}

#[async_trait]
impl SourceFetcher for TavilyNewsFetcher {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> SourceCategory {
        SourceCategory::News
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

        let request = SearchRequest {
            api_key,
            query: query.text(),
            search_depth: "advanced",
            max_results: max_results.min(MAX_RESULTS),
            include_answer: false,
            include_raw_content: false,
            include_images: false,
        };

        let response = self
            .http
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let body = read_body(response).await?;
        let mut documents = parse_results(&body)?;
        documents.truncate(max_results);
        debug!("[Tavily] {} news items for {}", documents.len(), query);
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_results_uses_content_as_abstract() {
        let body = r#"{
            "query": "ammonia cracking",
            "results": [
                {"title": "Startup pilots ammonia cracker", "url": "https://news.example/1",
                 "content": "A pilot plant...", "score": 0.91},
                {"title": null, "url": "https://news.example/2", "content": "orphan"}
            ]
        }"#;
        let docs = parse_results(body).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].abstract_text, "A pilot plant...");
        assert_eq!(docs[0].url.as_deref(), Some("https://news.example/1"));
        assert_eq!(docs[0].source, "Tavily News");
        assert_eq!(docs[0].year, None);
    }

    #[test]
    fn test_request_serialization() {
        let request = SearchRequest {
            api_key: "k",
            query: "\"ammonia\"",
            search_depth: "advanced",
            max_results: 10,
            include_answer: false,
            include_raw_content: false,
            include_images: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["search_depth"], "advanced");
        assert_eq!(json["max_results"], 10);
    }

    #[tokio::test]
    async fn test_fetch_without_key_fails_fast() {
        let fetcher = TavilyNewsFetcher::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/search",
            None,
            "TAVILY_API_KEY",
        );
        let err = fetcher
            .fetch(&SearchQuery::topic_synonym("x"), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingApiKey(_)));
        assert_eq!(fetcher.category(), SourceCategory::News);
    }
}
