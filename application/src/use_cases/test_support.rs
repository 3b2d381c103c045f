//! In-memory fakes shared by the use case tests.

use crate::ports::knowledge_store::{KnowledgeStore, StoreError};
use crate::ports::llm_gateway::{ChatMessage, GatewayError, LlmGateway};
use crate::ports::source_fetcher::{SourceError, SourceFetcher};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use vte_domain::{
    Document, EntryMetadata, ExpertId, KnowledgeEntry, ScoredChunk, SearchQuery, SourceCategory,
};

/// A scripted reply: text, or a failure.
pub enum Reply {
    Text(String),
    Fail,
}

pub fn text(s: &str) -> Reply {
    Reply::Text(s.to_string())
}

/// LLM gateway replaying queued replies in order.
///
/// When the queue runs dry the gateway answers `default_reply`, or fails if
/// none is set.
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Reply>>,
    default_reply: Option<String>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedGateway {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            default_reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_default(mut self, reply: &str) -> Self {
        self.default_reply = Some(reply.to_string());
        self
    }

    /// Gateway that fails every call
    pub fn failing() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(t)) => Ok(t),
            Some(Reply::Fail) => Err(GatewayError::RequestFailed("scripted failure".into())),
            None => self
                .default_reply
                .clone()
                .ok_or_else(|| GatewayError::ConnectionError("no scripted reply".into())),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Source fetcher replaying one queued batch per call.
pub struct FakeFetcher {
    name: String,
    category: SourceCategory,
    batches: Mutex<VecDeque<Result<Vec<Document>, SourceError>>>,
    queries: Mutex<Vec<String>>,
    available: bool,
}

impl FakeFetcher {
    pub fn new(name: &str, category: SourceCategory) -> Self {
        Self {
            name: name.to_string(),
            category,
            batches: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
            available: true,
        }
    }

    pub fn then_ok(self, docs: Vec<Document>) -> Self {
        self.batches.lock().unwrap().push_back(Ok(docs));
        self
    }

    pub fn then_err(self) -> Self {
        self.batches
            .lock()
            .unwrap()
            .push_back(Err(SourceError::RequestFailed("boom".into())));
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceFetcher for FakeFetcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> SourceCategory {
        self.category
    }

    fn check_available(&self) -> Result<(), SourceError> {
        if self.available {
            Ok(())
        } else {
            Err(SourceError::MissingApiKey("FAKE_API_KEY".into()))
        }
    }

    async fn fetch(
        &self,
        query: &SearchQuery,
        _max_results: usize,
    ) -> Result<Vec<Document>, SourceError> {
        self.queries.lock().unwrap().push(query.text().to_string());
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Documents `<prefix>0 .. <prefix>{n-1}` with ids set.
pub fn docs(prefix: &str, n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| {
            Document::new(format!("{prefix} title {i}"), "abstract", "OpenAlex")
                .with_id(format!("{prefix}{i}"))
        })
        .collect()
}

/// Knowledge store scoring entries by shared lowercase words.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<Vec<KnowledgeEntry>>,
    fail: bool,
}

impl InMemoryStore {
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            Err(StoreError::Backend("store offline".into()))
        } else {
            Ok(())
        }
    }
}

fn overlap(a: &str, b: &str) -> f32 {
    let words: Vec<String> = a.split_whitespace().map(str::to_lowercase).collect();
    b.split_whitespace()
        .filter(|w| words.contains(&w.to_lowercase()))
        .count() as f32
}

#[async_trait]
impl KnowledgeStore for InMemoryStore {
    async fn add(&self, entries: Vec<KnowledgeEntry>) -> Result<usize, StoreError> {
        self.check()?;
        let n = entries.len();
        self.entries.lock().unwrap().extend(entries);
        Ok(n)
    }

    async fn query(
        &self,
        expert_id: &ExpertId,
        text: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        self.check()?;
        let mut chunks: Vec<ScoredChunk> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| &e.metadata.expert_id == expert_id)
            .map(|e| ScoredChunk {
                content: e.content.clone(),
                metadata: e.metadata.clone(),
                score: overlap(&e.content, text),
            })
            .collect();
        chunks.sort_by(|a, b| b.score.total_cmp(&a.score));
        chunks.truncate(k);
        Ok(chunks)
    }

    async fn get(
        &self,
        expert_id: Option<&ExpertId>,
        limit: Option<usize>,
    ) -> Result<Vec<EntryMetadata>, StoreError> {
        self.check()?;
        let all: Vec<EntryMetadata> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| expert_id.is_none_or(|id| &e.metadata.expert_id == id))
            .map(|e| e.metadata.clone())
            .collect();
        Ok(match limit {
            Some(n) => all.into_iter().take(n).collect(),
            None => all,
        })
    }

    async fn delete(&self, expert_id: &ExpertId) -> Result<usize, StoreError> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| &e.metadata.expert_id != expert_id);
        Ok(before - entries.len())
    }
}
