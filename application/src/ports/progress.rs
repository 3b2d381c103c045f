//! Progress notification ports
//!
//! Implementations live in the presentation layer and can display
//! progress in various ways (spinners, plain lines, nothing at all).

use vte_domain::{DebateMessage, DebateMode, DebateState, KeywordPhrase, Persona, SearchQuery};

/// Callbacks for the research pipeline
pub trait ResearchProgressNotifier: Send + Sync {
    /// Called once keyword extraction and query synthesis are done
    fn on_queries_ready(&self, keywords: &[KeywordPhrase], queries: &[SearchQuery]);

    /// Called when fetching from one source starts
    fn on_source_start(&self, source: &str, limit: usize);

    /// Called after each query of a source
    fn on_query_complete(&self, source: &str, query: &SearchQuery, added: usize, total: usize);

    /// Called when a source finishes (or stops early)
    fn on_source_complete(&self, source: &str, collected: usize);

    /// Called when a source is skipped entirely
    fn on_source_skipped(&self, _source: &str, _reason: &str) {}
}

/// Callbacks for a debate run
pub trait DebateProgressNotifier: Send + Sync {
    /// `turn_limit` is the maximum number of turns the run can take
    fn on_debate_start(&self, mode: DebateMode, turn_limit: usize);

    /// `turn` is 1-based
    fn on_turn_start(&self, persona: &Persona, turn: usize);

    fn on_turn_complete(&self, message: &DebateMessage, turn: usize);

    fn on_debate_complete(&self, _state: &DebateState) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ResearchProgressNotifier for NoProgress {
    fn on_queries_ready(&self, _keywords: &[KeywordPhrase], _queries: &[SearchQuery]) {}
    fn on_source_start(&self, _source: &str, _limit: usize) {}
    fn on_query_complete(&self, _source: &str, _query: &SearchQuery, _added: usize, _total: usize) {}
    fn on_source_complete(&self, _source: &str, _collected: usize) {}
}

impl DebateProgressNotifier for NoProgress {
    fn on_debate_start(&self, _mode: DebateMode, _turn_limit: usize) {}
    fn on_turn_start(&self, _persona: &Persona, _turn: usize) {}
    fn on_turn_complete(&self, _message: &DebateMessage, _turn: usize) {}
}
