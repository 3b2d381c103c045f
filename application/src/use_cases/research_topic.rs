//! Research Topic use case
//!
//! topic → keywords → queries → adaptive fetch per source → merge →
//! new expert partition.

use super::adaptive_fetch::{AdaptiveFetchController, FetchReport};
use super::knowledge_partition::KnowledgePartition;
use super::synthesize_queries::QuerySynthesizer;
use crate::config::ResearchConfig;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, event};
use crate::ports::knowledge_store::StoreError;
use crate::ports::progress::{NoProgress, ResearchProgressNotifier};
use crate::ports::source_fetcher::SourceFetcher;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use vte_domain::{Document, ExpertId, KeywordPhrase, SearchQuery, Topic};

#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("No documents found for '{0}'")]
    NoDocuments(String),

    #[error("No research sources available")]
    NoSources,

    #[error("Knowledge store error: {0}")]
    Store(#[from] StoreError),
}

/// Per-source result summary
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub source: String,
    pub collected: usize,
    pub queries_run: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

/// Everything a research run produced
#[derive(Debug, Clone, Serialize)]
pub struct ResearchOutcome {
    pub expert_id: ExpertId,
    pub topic: String,
    pub keywords: Vec<KeywordPhrase>,
    pub queries: Vec<SearchQuery>,
    pub sources: Vec<SourceSummary>,
    pub documents: Vec<Document>,
    pub collected_at: DateTime<Utc>,
}

impl ResearchOutcome {
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}

/// Input for one research run
#[derive(Debug, Clone)]
pub struct ResearchTopicInput {
    pub topic: Topic,
    /// Overrides the per-source limit (news keeps its own limit)
    pub limit: Option<usize>,
}

impl ResearchTopicInput {
    pub fn new(topic: Topic) -> Self {
        Self { topic, limit: None }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

pub struct ResearchTopicUseCase {
    synthesizer: QuerySynthesizer,
    sources: Vec<Arc<dyn SourceFetcher>>,
    partition: KnowledgePartition,
    config: ResearchConfig,
    logger: Arc<dyn ConversationLogger>,
}

impl ResearchTopicUseCase {
    pub fn new(
        synthesizer: QuerySynthesizer,
        sources: Vec<Arc<dyn SourceFetcher>>,
        partition: KnowledgePartition,
        config: ResearchConfig,
        logger: Arc<dyn ConversationLogger>,
    ) -> Self {
        Self {
            synthesizer,
            sources,
            partition,
            config,
            logger,
        }
    }

    /// Execute with default (no-op) progress
    pub async fn execute(&self, input: ResearchTopicInput) -> Result<ResearchOutcome, ResearchError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: ResearchTopicInput,
        progress: &dyn ResearchProgressNotifier,
    ) -> Result<ResearchOutcome, ResearchError> {
        if self.sources.is_empty() {
            return Err(ResearchError::NoSources);
        }
        let topic = input.topic;
        let config = match input.limit {
            Some(limit) if limit > 0 => self.config.clone().with_per_source_limit(limit),
            _ => self.config.clone(),
        };

        let plan = self.synthesizer.generate_search_queries(&topic).await;
        progress.on_queries_ready(&plan.keywords, &plan.queries);
        self.logger.log(ConversationEvent::new(
            event::SEARCH_QUERIES,
            json!({
                "topic": topic.content(),
                "keywords": plan.keywords,
                "queries": plan.queries,
            }),
        ));

        let mut summaries = Vec::new();
        let mut documents = Vec::new();
        let mut seen = HashSet::new();

        for source in &self.sources {
            if let Err(e) = source.check_available() {
                warn!("Skipping {}: {}", source.name(), e);
                progress.on_source_skipped(source.name(), &e.to_string());
                summaries.push(SourceSummary {
                    source: source.name().to_string(),
                    collected: 0,
                    queries_run: 0,
                    skipped: Some(e.to_string()),
                });
                continue;
            }

            let limit = config.limit_for(source.category());
            progress.on_source_start(source.name(), limit);

            let fetcher = source.as_ref();
            let report = AdaptiveFetchController::new(limit)
                .run(
                    source.name(),
                    &plan.queries,
                    |query| async move { fetcher.fetch(&query, limit).await },
                    progress,
                )
                .await;
            self.log_report(&report);
            progress.on_source_complete(source.name(), report.documents.len());

            summaries.push(SourceSummary {
                source: report.source,
                collected: report.documents.len(),
                queries_run: report.stats.len(),
                skipped: None,
            });
            for doc in report.documents {
                if seen.insert(doc.dedup_key()) {
                    documents.push(doc);
                }
            }
        }

        if documents.is_empty() {
            return Err(ResearchError::NoDocuments(topic.content().to_string()));
        }

        let expert_id = self.partition.next_expert_id().await?;
        self.partition
            .add(&documents, &expert_id, topic.content())
            .await?;
        info!(
            "Research for '{}' stored {} documents as {}",
            topic,
            documents.len(),
            expert_id
        );

        self.logger.log(ConversationEvent::new(
            event::RESEARCH_COMPLETE,
            json!({
                "topic": topic.content(),
                "expert_id": expert_id.as_str(),
                "documents": documents.len(),
                "sources": summaries,
            }),
        ));

        Ok(ResearchOutcome {
            expert_id,
            topic: topic.content().to_string(),
            keywords: plan.keywords,
            queries: plan.queries,
            sources: summaries,
            documents,
            collected_at: Utc::now(),
        })
    }

    fn log_report(&self, report: &FetchReport) {
        for stat in &report.stats {
            self.logger.log(ConversationEvent::new(
                event::FETCH_QUERY,
                json!({
                    "source": report.source,
                    "query": stat.query.text(),
                    "strategy": stat.query.strategy().as_str(),
                    "returned": stat.returned,
                    "added": stat.added,
                    "error": stat.error,
                }),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::conversation_logger::NoConversationLogger;
    use crate::use_cases::extract_keywords::KeywordExtractor;
    use crate::use_cases::test_support::{FakeFetcher, InMemoryStore, ScriptedGateway, docs, text};
    use std::sync::Mutex;
    use vte_domain::SourceCategory;

    struct RecordingLogger(Mutex<Vec<&'static str>>);

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    fn use_case(
        sources: Vec<Arc<dyn SourceFetcher>>,
        store: Arc<InMemoryStore>,
        logger: Arc<dyn ConversationLogger>,
    ) -> ResearchTopicUseCase {
        // extraction answers, every other helper call fails soft
        let gateway = Arc::new(ScriptedGateway::new(vec![text("\"ammonia\" \"cracking\"")]));
        ResearchTopicUseCase::new(
            QuerySynthesizer::new(KeywordExtractor::new(gateway)),
            sources,
            KnowledgePartition::new(store),
            ResearchConfig::default().with_news_limit(2),
            logger,
        )
    }

    fn topic() -> Topic {
        Topic::new("ammonia cracking").unwrap()
    }

    fn dynamic(fetcher: &Arc<FakeFetcher>) -> Arc<dyn SourceFetcher> {
        fetcher.clone()
    }

    #[tokio::test]
    async fn test_pipeline_merges_sources_and_creates_partition() {
        let papers = Arc::new(FakeFetcher::new("OpenAlex", SourceCategory::Article).then_ok(docs("w", 12)));
        let news = Arc::new(FakeFetcher::new("Tavily News", SourceCategory::News).then_ok(docs("n", 5)));
        let store = Arc::new(InMemoryStore::default());

        let outcome = use_case(
            vec![dynamic(&papers), dynamic(&news)],
            store.clone(),
            Arc::new(NoConversationLogger),
        )
        .execute(ResearchTopicInput::new(topic()))
        .await
        .unwrap();

        assert_eq!(outcome.expert_id.as_str(), "expert_1");
        // 12 papers (first query ≥ half of 20) + 2 news (limit 2)
        assert_eq!(outcome.document_count(), 14);
        assert_eq!(store.len(), 14);
        assert_eq!(papers.queries().len(), 1);
        assert_eq!(outcome.sources[1].collected, 2);
    }

    #[tokio::test]
    async fn test_second_run_gets_next_expert_id() {
        let store = Arc::new(InMemoryStore::default());
        for expected in ["expert_1", "expert_2"] {
            let papers = Arc::new(FakeFetcher::new("OpenAlex", SourceCategory::Article).then_ok(docs("w", 10)));
            let outcome = use_case(vec![dynamic(&papers)], store.clone(), Arc::new(NoConversationLogger))
                .execute(ResearchTopicInput::new(topic()))
                .await
                .unwrap();
            assert_eq!(outcome.expert_id.as_str(), expected);
        }
    }

    #[tokio::test]
    async fn test_cross_source_duplicates_merged() {
        let a = Arc::new(FakeFetcher::new("A", SourceCategory::Article).then_ok(docs("x", 10)));
        let b = Arc::new(FakeFetcher::new("B", SourceCategory::Article).then_ok(docs("x", 10)));
        let outcome = use_case(vec![dynamic(&a), dynamic(&b)], Arc::new(InMemoryStore::default()), Arc::new(NoConversationLogger))
            .execute(ResearchTopicInput::new(topic()))
            .await
            .unwrap();
        assert_eq!(outcome.document_count(), 10);
    }

    #[tokio::test]
    async fn test_unavailable_source_is_skipped() {
        let missing = Arc::new(FakeFetcher::new("USPTO", SourceCategory::Patent).unavailable());
        let papers = Arc::new(FakeFetcher::new("OpenAlex", SourceCategory::Article).then_ok(docs("w", 3)));
        let outcome = use_case(
            vec![dynamic(&missing), dynamic(&papers)],
            Arc::new(InMemoryStore::default()),
            Arc::new(NoConversationLogger),
        )
        .execute(ResearchTopicInput::new(topic()))
        .await
        .unwrap();

        assert!(missing.queries().is_empty());
        assert!(outcome.sources[0].skipped.is_some());
        assert_eq!(outcome.document_count(), 3);
    }

    #[tokio::test]
    async fn test_no_documents_creates_no_partition() {
        let empty = Arc::new(FakeFetcher::new("OpenAlex", SourceCategory::Article).then_err());
        let store = Arc::new(InMemoryStore::default());
        let err = use_case(vec![dynamic(&empty)], store.clone(), Arc::new(NoConversationLogger))
            .execute(ResearchTopicInput::new(topic()))
            .await
            .unwrap_err();
        assert!(matches!(err, ResearchError::NoDocuments(_)));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_limit_override_and_events() {
        let papers = Arc::new(FakeFetcher::new("OpenAlex", SourceCategory::Article).then_ok(docs("w", 12)));
        let logger = Arc::new(RecordingLogger(Mutex::new(Vec::new())));
        let outcome = use_case(vec![dynamic(&papers)], Arc::new(InMemoryStore::default()), logger.clone())
            .execute(ResearchTopicInput::new(topic()).with_limit(Some(5)))
            .await
            .unwrap();

        assert_eq!(outcome.document_count(), 5);
        let events = logger.0.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![event::SEARCH_QUERIES, event::FETCH_QUERY, event::RESEARCH_COMPLETE]
        );
    }

    #[tokio::test]
    async fn test_no_sources() {
        let err = use_case(vec![], Arc::new(InMemoryStore::default()), Arc::new(NoConversationLogger))
            .execute(ResearchTopicInput::new(topic()))
            .await
            .unwrap_err();
        assert!(matches!(err, ResearchError::NoSources));
    }
}
