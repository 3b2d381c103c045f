//! Ollama adapters
//!
//! [`OllamaLlmGateway`] implements the [`LlmGateway`](vte_application::LlmGateway)
//! port over `POST /api/chat`; [`OllamaEmbedder`] feeds the knowledge store
//! from `POST /api/embed`. Both share one [`OllamaClient`].

mod client;
mod embedder;
mod gateway;
mod protocol;

pub use client::{OllamaClient, OllamaError};
pub use embedder::OllamaEmbedder;
pub use gateway::OllamaLlmGateway;
