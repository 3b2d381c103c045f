//! Knowledge store port
//!
//! A shared, tagged document store with similarity search. Every scoped
//! operation filters by exact match on `expert_id`.

use async_trait::async_trait;
use thiserror::Error;
use vte_domain::{EntryMetadata, ExpertId, KnowledgeEntry, ScoredChunk};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Bulk insert. Returns the number of entries written.
    async fn add(&self, entries: Vec<KnowledgeEntry>) -> Result<usize, StoreError>;

    /// Top `k` entries of one partition ranked by similarity to `text`.
    async fn query(
        &self,
        expert_id: &ExpertId,
        text: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError>;

    /// Metadata of stored entries, optionally scoped to one partition.
    async fn get(
        &self,
        expert_id: Option<&ExpertId>,
        limit: Option<usize>,
    ) -> Result<Vec<EntryMetadata>, StoreError>;

    /// Remove every entry of one partition. Returns the number removed.
    async fn delete(&self, expert_id: &ExpertId) -> Result<usize, StoreError>;
}
