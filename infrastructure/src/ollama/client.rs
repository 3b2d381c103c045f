//! Shared HTTP client for an Ollama server.

use super::protocol::ErrorBody;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("Cannot reach Ollama at {url}: {message}")]
    Connection { url: String, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Ollama returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, OllamaError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OllamaError::Connection {
                url: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST `body` as JSON to `path` and decode the JSON reply.
    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, OllamaError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OllamaError::Timeout
                } else {
                    OllamaError::Connection {
                        url: url.clone(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| OllamaError::InvalidResponse(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(status_error(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| OllamaError::InvalidResponse(e.to_string()))
    }
}

/// Map a non-2xx reply to an error, using Ollama's `{"error": ...}` body
/// when present.
pub(crate) fn status_error(status: u16, body: &str) -> OllamaError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().to_string());
    if status == 404 && message.contains("not found") {
        OllamaError::ModelNotFound(message)
    } else {
        OllamaError::Status { status, message }
    }
}
