//! Source fetcher port
//!
//! One external research source (paper index, patent office, news search).
//! Adapters map the source's records into [`Document`]s.

use async_trait::async_trait;
use thiserror::Error;
use vte_domain::{Document, SearchQuery, SourceCategory};

/// Errors from one source request
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("API key not configured (set {0})")]
    MissingApiKey(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Access denied (HTTP 403): {0}")]
    Forbidden(String),

    #[error("Query rejected (HTTP 400): {0}")]
    BadRequest(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Display name, also stored as the `source` of each document
    fn name(&self) -> &str;

    fn category(&self) -> SourceCategory;

    /// Whether the source can be queried at all (API key present and so on).
    ///
    /// The research pipeline skips unavailable sources with a warning.
    fn check_available(&self) -> Result<(), SourceError> {
        Ok(())
    }

    /// Run one query, asking for at most `max_results` records.
    async fn fetch(
        &self,
        query: &SearchQuery,
        max_results: usize,
    ) -> Result<Vec<Document>, SourceError>;
}
