//! Infrastructure layer for vte
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Ollama chat gateway and embedder, the
//! research source fetchers, the file-backed knowledge store, the JSONL
//! run logger, and configuration file loading.

pub mod config;
pub mod knowledge;
pub mod logging;
pub mod ollama;
pub mod sources;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, EmbedderKind, FileConfig, FileKnowledgeConfig,
    FileLlmConfig, FileSourcesConfig, Severity,
};
pub use knowledge::{Embedder, FileKnowledgeStore, HashingEmbedder};
pub use logging::JsonlConversationLogger;
pub use ollama::{OllamaClient, OllamaEmbedder, OllamaError, OllamaLlmGateway};
pub use sources::{
    OpenAlexFetcher, PatentsViewFetcher, TavilyNewsFetcher, build_http_client,
    configured_sources,
};
