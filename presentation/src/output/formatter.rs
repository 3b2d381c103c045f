//! Output formatter trait

use vte_domain::DebateState;

/// Trait for formatting a finished (or interrupted) debate
pub trait OutputFormatter {
    /// Transcript followed by the closing statement
    fn format(&self, state: &DebateState) -> String;

    /// Format as JSON
    fn format_json(&self, state: &DebateState) -> String;

    /// Transcript only
    fn format_transcript(&self, state: &DebateState) -> String;
}
