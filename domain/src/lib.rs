//! Domain layer for vte
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Research
//!
//! A free-text [`Topic`] is reduced to a handful of [`KeywordPhrase`]s, which
//! are combined into an ordered list of boolean [`SearchQuery`]s. Fetched
//! records are normalized into [`Document`]s.
//!
//! ## Knowledge
//!
//! Documents collected for one topic form an *expert partition*, tagged with
//! a single [`ExpertId`] inside a shared knowledge store.
//!
//! ## Debate
//!
//! A fixed table of [`Persona`]s takes turns on a [`DebateState`]. The order
//! of speakers is decided by a per-mode [`DebateGraph`].

pub mod core;
pub mod debate;
pub mod knowledge;
pub mod prompt;
pub mod research;

// Re-export commonly used types
pub use core::{error::DomainError, string::tail_chars, string::truncate};
pub use debate::{
    graph::{DebateGraph, Transition, consensus_route},
    mode::DebateMode,
    persona::{Persona, PersonaKey, PersonaRegistry},
    state::{DebateMessage, DebateState, INITIAL_SPEAKER},
};
pub use knowledge::{
    entry::{EntryMetadata, KnowledgeEntry, ScoredChunk, SourceCategory},
    expert::{ExpertId, ExpertSummary},
};
pub use prompt::PromptTemplate;
pub use research::{
    document::{DedupKey, Document},
    keyword::{ExtractionError, KeywordPhrase, MAX_PHRASES, parse_keyword_response},
    parsing::{parse_index_list, parse_synonym_list},
    query::{EXPANSION_WORD_BUDGET, QueryStrategy, SearchQuery, TermGroup, relaxation_subsets},
    topic::Topic,
};
