//! Language model configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};

/// Raw Ollama connection settings
///
/// # Example
///
/// ```toml
/// [llm]
/// base_url = "http://localhost:11434"
/// chat_model = "llama3.1"
/// embedding_model = "nomic-embed-text"
/// temperature = 0.7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub temperature: f32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            chat_model: "llama3.1".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}
