//! Chat model gateway over Ollama's `/api/chat`.

use super::client::{OllamaClient, OllamaError};
use super::protocol::{ChatOptions, ChatRequest, ChatResponse, WireMessage};
use async_trait::async_trait;
use tracing::{debug, info};
use vte_application::{ChatMessage, GatewayError, LlmGateway};

pub struct OllamaLlmGateway {
    client: OllamaClient,
    model: String,
    temperature: f32,
}

impl OllamaLlmGateway {
    pub fn new(client: OllamaClient, model: impl Into<String>, temperature: f32) -> Self {
        let model = model.into();
        info!("Using Ollama chat model {} at {}", model, client.base_url());
        Self {
            client,
            model,
            temperature,
        }
    }

    fn request<'a>(&'a self, messages: &[ChatMessage]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: messages.iter().map(WireMessage::from_chat).collect(),
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
            },
        }
    }
}

impl From<OllamaError> for GatewayError {
    fn from(e: OllamaError) -> Self {
        match e {
            OllamaError::Connection { .. } => GatewayError::ConnectionError(e.to_string()),
            OllamaError::Timeout => GatewayError::Timeout,
            OllamaError::ModelNotFound(m) => GatewayError::ModelNotAvailable(m),
            OllamaError::Status { .. } => GatewayError::RequestFailed(e.to_string()),
            OllamaError::InvalidResponse(m) => GatewayError::InvalidResponse(m),
        }
    }
}

/// Reply text of a chat response; an empty or missing message is an error.
fn reply_text(response: ChatResponse) -> Result<String, GatewayError> {
    if let Some(error) = response.error {
        return Err(GatewayError::RequestFailed(error));
    }
    match response.message {
        Some(message) if !message.content.trim().is_empty() => Ok(message.content),
        _ => Err(GatewayError::InvalidResponse("empty reply".to_string())),
    }
}

#[async_trait]
impl LlmGateway for OllamaLlmGateway {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        debug!("Chat request to {} with {} messages", self.model, messages.len());
        let response: ChatResponse = self
            .client
            .post_json("api/chat", &self.request(messages))
            .await?;
        reply_text(response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
