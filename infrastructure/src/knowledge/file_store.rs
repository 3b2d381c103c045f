//! File-backed knowledge store with persistent JSON-lines storage.
//!
//! Each line is one JSON-encoded chunk: content, metadata and its
//! embedding. Records are loaded into memory on open and the whole file
//! is rewritten on every mutation (add, delete). Queries rank the
//! partition's chunks by cosine similarity in memory.

use super::embedder::Embedder;
use super::vector::top_k;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use vte_application::{KnowledgeStore, StoreError};
use vte_domain::{EntryMetadata, ExpertId, KnowledgeEntry, ScoredChunk};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredChunk {
    content: String,
    metadata: EntryMetadata,
    embedding: Vec<f32>,
}

pub struct FileKnowledgeStore {
    path: PathBuf,
    embedder: Arc<dyn Embedder>,
    chunks: RwLock<Vec<StoredChunk>>,
}

impl FileKnowledgeStore {
    /// Open the store at `path`, loading existing chunks.
    ///
    /// A missing file starts empty (created on first write). Corrupted
    /// lines are skipped with a warning.
    pub fn open(path: impl Into<PathBuf>, embedder: Arc<dyn Embedder>) -> Result<Self, StoreError> {
        let path = path.into();
        let chunks = Self::load_from_disk(&path)?;
        debug!(
            "Knowledge store {} loaded {} chunks (embedder: {})",
            path.display(),
            chunks.len(),
            embedder.name()
        );
        Ok(Self {
            path,
            embedder,
            chunks: RwLock::new(chunks),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(path: &Path) -> Result<Vec<StoredChunk>, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<StoredChunk>(line) {
                Ok(chunk) => Some(chunk),
                Err(e) => {
                    warn!("Skipping corrupted knowledge entry: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Rewrite the whole file from `chunks`. Callers swap the in-memory
    /// vector only after this succeeds.
    async fn flush(&self, chunks: &[StoredChunk]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StoreError::Io(format!("Failed to create store directory: {}", e))
            })?;
        }

        let mut content = String::new();
        for chunk in chunks {
            let line = serde_json::to_string(chunk)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            content.push_str(&line);
            content.push('\n');
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| StoreError::Io(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl KnowledgeStore for FileKnowledgeStore {
    async fn add(&self, entries: Vec<KnowledgeEntry>) -> Result<usize, StoreError> {
        if entries.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = entries.iter().map(|e| e.content.clone()).collect();
        let embeddings = self.embedder.embed(&texts).await?;
        if embeddings.len() != entries.len() {
            return Err(StoreError::Embedding(format!(
                "expected {} embeddings, got {}",
                entries.len(),
                embeddings.len()
            )));
        }

        let written = entries.len();
        let mut chunks = self.chunks.write().await;
        let mut updated = chunks.clone();
        updated.extend(
            entries
                .into_iter()
                .zip(embeddings)
                .map(|(entry, embedding)| StoredChunk {
                    content: entry.content,
                    metadata: entry.metadata,
                    embedding,
                }),
        );
        self.flush(&updated).await?;
        *chunks = updated;
        Ok(written)
    }

    async fn query(
        &self,
        expert_id: &ExpertId,
        text: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let chunks = self.chunks.read().await;
        if !chunks.iter().any(|c| &c.metadata.expert_id == expert_id) {
            return Ok(Vec::new());
        }

        let query = self
            .embedder
            .embed(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Embedding("no embedding returned for query".into()))?;

        let candidates = chunks
            .iter()
            .enumerate()
            .filter(|(_, c)| &c.metadata.expert_id == expert_id)
            .map(|(i, c)| (i, c.embedding.as_slice()));

        Ok(top_k(&query, candidates, k)
            .into_iter()
            .map(|(i, score)| ScoredChunk {
                content: chunks[i].content.clone(),
                metadata: chunks[i].metadata.clone(),
                score,
            })
            .collect())
    }

    async fn get(
        &self,
        expert_id: Option<&ExpertId>,
        limit: Option<usize>,
    ) -> Result<Vec<EntryMetadata>, StoreError> {
        let chunks = self.chunks.read().await;
        Ok(chunks
            .iter()
            .filter(|c| expert_id.is_none_or(|id| &c.metadata.expert_id == id))
            .take(limit.unwrap_or(usize::MAX))
            .map(|c| c.metadata.clone())
            .collect())
    }

    async fn delete(&self, expert_id: &ExpertId) -> Result<usize, StoreError> {
        let mut chunks = self.chunks.write().await;
        let kept: Vec<StoredChunk> = chunks
            .iter()
            .filter(|c| &c.metadata.expert_id != expert_id)
            .cloned()
            .collect();
        let removed = chunks.len() - kept.len();
        if removed > 0 {
            self.flush(&kept).await?;
            *chunks = kept;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::HashingEmbedder;
    use vte_domain::Document;

    fn entry(title: &str, abstract_text: &str, expert: u64) -> KnowledgeEntry {
        KnowledgeEntry::from_document(
            &Document::new(title, abstract_text, "OpenAlex").with_id(title),
            &ExpertId::numbered(expert),
            "ammonia cracking",
        )
    }

    fn open(path: &Path) -> FileKnowledgeStore {
        FileKnowledgeStore::open(path, Arc::new(HashingEmbedder::default())).unwrap()
    }

    #[tokio::test]
    async fn test_query_is_scoped_and_ranked() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir.path().join("k.jsonl"));
        store
            .add(vec![
                entry("Smartphone market", "shipments fell in europe", 1),
                entry("Ruthenium catalyst", "ammonia cracking at low temperature", 1),
                entry("Ammonia cracking reactor", "ammonia cracking membrane", 2),
            ])
            .await
            .unwrap();

        let chunks = store
            .query(&ExpertId::numbered(1), "ammonia cracking catalyst", 5)
            .await
            .unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].content.contains("Ruthenium"));
        assert!(chunks[0].score >= chunks[1].score);
        assert!(chunks.iter().all(|c| c.metadata.expert_id == ExpertId::numbered(1)));
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("k.jsonl");
        {
            let store = open(&path);
            store
                .add(vec![entry("a", "x", 1), entry("b", "y", 3)])
                .await
                .unwrap();
        }

        let store = open(&path);
        let all = store.get(None, None).await.unwrap();
        assert_eq!(all.len(), 2);
        let one = store.get(Some(&ExpertId::numbered(3)), None).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].paper_id.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_delete_removes_only_partition() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("k.jsonl");
        let store = open(&path);
        store
            .add(vec![entry("a", "x", 1), entry("b", "y", 1), entry("c", "z", 2)])
            .await
            .unwrap();

        assert_eq!(store.delete(&ExpertId::numbered(1)).await.unwrap(), 2);
        assert_eq!(store.delete(&ExpertId::numbered(1)).await.unwrap(), 0);
        assert!(
            store
                .query(&ExpertId::numbered(1), "x", 3)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(open(&path).get(None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir.path().join("k.jsonl"));
        store
            .add(vec![entry("a", "x", 1), entry("b", "y", 1)])
            .await
            .unwrap();
        let limited = store.get(Some(&ExpertId::numbered(1)), Some(1)).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("store");
        let store = open(&parent.join("k.jsonl"));
        store.add(vec![entry("a", "x", 1)]).await.unwrap();

        std::fs::remove_dir_all(&parent).unwrap();
        std::fs::write(&parent, "not a directory").unwrap();

        assert!(store.delete(&ExpertId::numbered(1)).await.is_err());
        assert_eq!(
            store.get(Some(&ExpertId::numbered(1)), None).await.unwrap().len(),
            1
        );

        assert!(store.add(vec![entry("b", "y", 2)]).await.is_err());
        assert!(
            store
                .get(Some(&ExpertId::numbered(2)), None)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_corrupted_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("k.jsonl");
        {
            let store = open(&path);
            store.add(vec![entry("a", "x", 1)]).await.unwrap();
        }
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("{not json\n");
        std::fs::write(&path, content).unwrap();

        assert_eq!(open(&path).get(None, None).await.unwrap().len(), 1);
    }
}
