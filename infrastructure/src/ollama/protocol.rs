//! Ollama REST request and response bodies.

use serde::{Deserialize, Serialize};
use vte_application::{ChatMessage, Role};

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage>,
    pub stream: bool,
    pub options: ChatOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatOptions {
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl WireMessage {
    /// Ollama has no speaker field; named turns are prefixed with the
    /// speaker so multi-party transcripts stay readable to the model.
    pub fn from_chat(message: &ChatMessage) -> Self {
        let content = match (&message.role, &message.name) {
            (Role::Assistant, Some(name)) => format!("{}: {}", name, message.content),
            _ => message.content.clone(),
        };
        Self {
            role: message.role,
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub message: Option<WireMessage>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmbedRequest<'a> {
    pub model: &'a str,
    pub input: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbedResponse {
    #[serde(default)]
    pub embeddings: Vec<Vec<f32>>,
}

/// `{"error": "..."}` body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
