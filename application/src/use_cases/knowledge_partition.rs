//! Knowledge partition management
//!
//! Thin layer over the [`KnowledgeStore`] port that scopes every operation
//! to one expert partition. There is no dedup against earlier writes:
//! adding the same documents twice stores them twice.

use crate::ports::knowledge_store::{KnowledgeStore, StoreError};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use vte_domain::{
    Document, ExpertId, ExpertSummary, KnowledgeEntry, ScoredChunk, SourceCategory,
};

#[derive(Clone)]
pub struct KnowledgePartition {
    store: Arc<dyn KnowledgeStore>,
}

impl KnowledgePartition {
    pub fn new(store: Arc<dyn KnowledgeStore>) -> Self {
        Self { store }
    }

    /// Store `documents` under `expert_id`. Returns the number written.
    pub async fn add(
        &self,
        documents: &[Document],
        expert_id: &ExpertId,
        topic: &str,
    ) -> Result<usize, StoreError> {
        if documents.is_empty() {
            return Ok(0);
        }
        let entries: Vec<KnowledgeEntry> = documents
            .iter()
            .map(|doc| KnowledgeEntry::from_document(doc, expert_id, topic))
            .collect();
        let written = self.store.add(entries).await?;
        info!("Added {} documents to {}", written, expert_id);
        Ok(written)
    }

    /// Top `k` chunks of the partition for `query_text`.
    pub async fn retrieve(
        &self,
        expert_id: &ExpertId,
        query_text: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        let chunks = self.store.query(expert_id, query_text, k).await?;
        debug!("Retrieved {} chunks from {}", chunks.len(), expert_id);
        Ok(chunks)
    }

    /// Whether any entry is tagged with `expert_id`. Store errors read as `false`.
    pub async fn exists(&self, expert_id: &ExpertId) -> bool {
        match self.store.get(Some(expert_id), Some(1)).await {
            Ok(entries) => !entries.is_empty(),
            Err(e) => {
                warn!("Could not check {}: {}", expert_id, e);
                false
            }
        }
    }

    /// Remove the whole partition. Returns `false` when the store failed.
    pub async fn delete(&self, expert_id: &ExpertId) -> bool {
        match self.store.delete(expert_id).await {
            Ok(removed) => {
                info!("Deleted {} entries of {}", removed, expert_id);
                true
            }
            Err(e) => {
                warn!("Could not delete {}: {}", expert_id, e);
                false
            }
        }
    }

    /// One past the highest `expert_<n>` in the store.
    pub async fn next_expert_id(&self) -> Result<ExpertId, StoreError> {
        let metadata = self.store.get(None, None).await?;
        Ok(ExpertId::next_after(
            metadata.iter().map(|m| m.expert_id.as_str()),
        ))
    }

    /// Per-partition document counts, ordered by expert number then id.
    pub async fn list_experts(&self) -> Result<Vec<ExpertSummary>, StoreError> {
        let metadata = self.store.get(None, None).await?;

        let mut summaries: BTreeMap<(u64, ExpertId), ExpertSummary> = BTreeMap::new();
        for meta in metadata {
            let order = (meta.expert_id.number().unwrap_or(u64::MAX), meta.expert_id.clone());
            let summary = summaries
                .entry(order)
                .or_insert_with(|| ExpertSummary::new(meta.expert_id.clone(), meta.topic.clone()));
            summary.doc_count += 1;
            match SourceCategory::from_source(&meta.source) {
                SourceCategory::Article => summary.articles += 1,
                SourceCategory::Patent => summary.patents += 1,
                SourceCategory::News => summary.news += 1,
            }
        }

        Ok(summaries.into_values().collect())
    }

    /// Topic recorded for `expert_id`, if the partition exists.
    pub async fn expert_topic(&self, expert_id: &ExpertId) -> Result<Option<String>, StoreError> {
        let metadata = self.store.get(Some(expert_id), Some(1)).await?;
        Ok(metadata.into_iter().next().map(|m| m.topic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{InMemoryStore, docs};

    fn partition() -> (KnowledgePartition, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::default());
        (KnowledgePartition::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_next_expert_id_empty_store() {
        let (p, _) = partition();
        assert_eq!(p.next_expert_id().await.unwrap().as_str(), "expert_1");
    }

    #[tokio::test]
    async fn test_next_expert_id_after_gap() {
        let (p, _) = partition();
        p.add(&docs("a", 1), &ExpertId::numbered(1), "t1").await.unwrap();
        p.add(&docs("b", 1), &ExpertId::numbered(3), "t3").await.unwrap();
        assert_eq!(p.next_expert_id().await.unwrap().as_str(), "expert_4");
    }

    #[tokio::test]
    async fn test_add_retrieve_delete_round_trip() {
        let (p, store) = partition();
        let e1 = ExpertId::numbered(1);
        let e2 = ExpertId::numbered(2);
        p.add(&docs("a", 3), &e1, "ammonia").await.unwrap();
        p.add(&docs("b", 2), &e2, "hydrogen").await.unwrap();

        let chunks = p.retrieve(&e1, "a title", 10).await.unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.metadata.expert_id == e1));
        assert!(p.exists(&e1).await);

        assert!(p.delete(&e1).await);
        assert!(!p.exists(&e1).await);
        assert!(p.retrieve(&e1, "a title", 10).await.unwrap().is_empty());
        // other partitions untouched
        assert_eq!(store.len(), 2);
        assert!(p.exists(&e2).await);
    }

    #[tokio::test]
    async fn test_add_is_additive() {
        let (p, store) = partition();
        let e = ExpertId::numbered(1);
        p.add(&docs("a", 2), &e, "t").await.unwrap();
        p.add(&docs("a", 2), &e, "t").await.unwrap();
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn test_store_failure_reads_as_false() {
        let p = KnowledgePartition::new(Arc::new(InMemoryStore::failing()));
        let e = ExpertId::numbered(1);
        assert!(!p.exists(&e).await);
        assert!(!p.delete(&e).await);
        assert!(p.next_expert_id().await.is_err());
    }

    #[tokio::test]
    async fn test_list_experts_classifies_sources() {
        let (p, _) = partition();
        let e = ExpertId::numbered(2);
        let documents = vec![
            Document::new("p", "a", "OpenAlex").with_id("W1"),
            Document::new("q", "a", "USPTO").with_source_number("123"),
            Document::new("r", "a", "Tavily News").with_url("https://n/1"),
            Document::new("s", "a", "Tavily News").with_url("https://n/2"),
        ];
        p.add(&documents, &e, "ammonia cracking").await.unwrap();
        p.add(&docs("x", 1), &ExpertId::numbered(10), "other").await.unwrap();

        let experts = p.list_experts().await.unwrap();
        assert_eq!(experts.len(), 2);
        assert_eq!(experts[0].expert_id, e);
        assert_eq!(experts[0].topic, "ammonia cracking");
        assert_eq!(
            (experts[0].doc_count, experts[0].articles, experts[0].patents, experts[0].news),
            (4, 1, 1, 2)
        );
        assert_eq!(experts[1].expert_id.as_str(), "expert_10");
    }

    #[tokio::test]
    async fn test_expert_topic() {
        let (p, _) = partition();
        let e = ExpertId::numbered(1);
        p.add(&docs("a", 1), &e, "solid state batteries").await.unwrap();
        assert_eq!(
            p.expert_topic(&e).await.unwrap().as_deref(),
            Some("solid state batteries")
        );
        assert_eq!(p.expert_topic(&ExpertId::numbered(9)).await.unwrap(), None);
    }
}
