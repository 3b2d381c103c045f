//! Port for structured run logging.
//!
//! Defines the [`ConversationLogger`] trait for recording research and
//! debate events (synthesized queries, per-query fetch results, debate
//! turns) to a machine-readable log, one record per event.
//!
//! `tracing` handles human-readable diagnostics; this port keeps the full
//! transcript and query trail for later inspection.

use serde_json::Value;

/// Event type names written by the use cases.
pub mod event {
    pub const SEARCH_QUERIES: &str = "search_queries";
    pub const FETCH_QUERY: &str = "fetch_query";
    pub const RESEARCH_COMPLETE: &str = "research_complete";
    pub const DEBATE_TURN: &str = "debate_turn";
    pub const DEBATE_COMPLETE: &str = "debate_complete";
}

/// A structured event: a type name plus a JSON payload.
///
/// The adapter adds the timestamp when the event is written.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    pub event_type: &'static str,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Sink for [`ConversationEvent`]s.
///
/// `log` is synchronous and infallible; write failures are the adapter's
/// concern and never interrupt a run.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
