//! Local knowledge store
//!
//! A file-backed vector store implementing the
//! [`KnowledgeStore`](vte_application::KnowledgeStore) port, plus the
//! embedders it uses to rank chunks.

mod embedder;
mod file_store;
mod vector;

pub use embedder::{Embedder, HashingEmbedder};
pub use file_store::FileKnowledgeStore;
pub use vector::cosine_similarity;
