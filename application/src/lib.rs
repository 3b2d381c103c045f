//! Application layer for vte
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DebateConfig, ResearchConfig};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    knowledge_store::{KnowledgeStore, StoreError},
    llm_gateway::{ChatMessage, GatewayError, LlmGateway, Role},
    progress::{DebateProgressNotifier, NoProgress, ResearchProgressNotifier},
    source_fetcher::{SourceError, SourceFetcher},
};
pub use use_cases::adaptive_fetch::{
    AdaptiveFetchController, FetchReport, QueryStat, StopReason, adaptive_fetch,
};
pub use use_cases::extract_keywords::KeywordExtractor;
pub use use_cases::knowledge_partition::KnowledgePartition;
pub use use_cases::research_topic::{
    ResearchError, ResearchOutcome, ResearchTopicInput, ResearchTopicUseCase, SourceSummary,
};
pub use use_cases::retrieve_context::ContextRetriever;
pub use use_cases::run_debate::{DebateEngine, RunDebateError, RunDebateInput};
pub use use_cases::synthesize_queries::{QueryPlan, QuerySynthesizer};
