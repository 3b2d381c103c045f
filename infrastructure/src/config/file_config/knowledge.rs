//! Knowledge store configuration from TOML (`[knowledge]` section)

use super::super::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Embedding backend for the knowledge store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedderKind {
    /// Ollama `/api/embed` with `llm.embedding_model`
    #[default]
    Ollama,
    /// Local feature hashing, no model server needed
    Hashing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKnowledgeConfig {
    /// JSON file holding every partition. Defaults under the user data dir.
    pub store_path: Option<String>,
    /// `ollama` or `hashing`
    pub embedder: String,
}

impl Default for FileKnowledgeConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            embedder: "ollama".to_string(),
        }
    }
}

impl FileKnowledgeConfig {
    pub fn parse_embedder(&self) -> (EmbedderKind, Vec<ConfigIssue>) {
        match self.embedder.trim().to_lowercase().as_str() {
            "ollama" => (EmbedderKind::Ollama, Vec::new()),
            "hashing" | "hash" => (EmbedderKind::Hashing, Vec::new()),
            _ => (
                EmbedderKind::Ollama,
                vec![ConfigIssue::invalid_enum(
                    "knowledge.embedder",
                    &self.embedder,
                    &["ollama", "hashing"],
                    "ollama",
                )],
            ),
        }
    }

    /// Configured path, else `<data_dir>/vte/knowledge.json`, else `./knowledge.json`.
    pub fn resolved_store_path(&self) -> PathBuf {
        match &self.store_path {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => dirs::data_dir()
                .map(|dir| dir.join("vte").join("knowledge.json"))
                .unwrap_or_else(|| PathBuf::from("knowledge.json")),
        }
    }
}
