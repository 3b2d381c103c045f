//! Embeddings from Ollama's `/api/embed`.

use super::client::OllamaClient;
use super::protocol::{EmbedRequest, EmbedResponse};
use crate::knowledge::Embedder;
use async_trait::async_trait;
use vte_application::StoreError;

pub struct OllamaEmbedder {
    client: OllamaClient,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(client: OllamaClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, StoreError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };
        let response: EmbedResponse = self
            .client
            .post_json("api/embed", &request)
            .await
            .map_err(|e| StoreError::Embedding(e.to_string()))?;

        if response.embeddings.len() != texts.len() {
            return Err(StoreError::Embedding(format!(
                "{} returned {} embeddings for {} inputs",
                self.model,
                response.embeddings.len(),
                texts.len()
            )));
        }
        Ok(response.embeddings)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
