//! Per-turn context retrieval for the debate.

use super::knowledge_partition::KnowledgePartition;
use crate::ports::knowledge_store::StoreError;
use vte_domain::{DebateState, tail_chars};

/// Characters of the latest message used as the retrieval query
pub const QUERY_TAIL_CHARS: usize = 200;

#[derive(Clone)]
pub struct ContextRetriever {
    partition: KnowledgePartition,
    k: usize,
}

impl ContextRetriever {
    pub fn new(partition: KnowledgePartition, k: usize) -> Self {
        Self { partition, k }
    }

    /// The topic before anyone has spoken, then the tail of the latest message.
    pub fn query_text(state: &DebateState) -> &str {
        match state.last_message() {
            Some(message) => tail_chars(&message.content, QUERY_TAIL_CHARS),
            None => state.topic(),
        }
    }

    /// Retrieved chunks joined by blank lines.
    pub async fn retrieve(&self, state: &DebateState) -> Result<String, StoreError> {
        let chunks = self
            .partition
            .retrieve(state.expert_id(), Self::query_text(state), self.k)
            .await?;
        Ok(chunks
            .into_iter()
            .map(|c| c.content)
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
