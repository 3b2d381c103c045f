//! Debate engine parameters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Per-persona turn budget for the consensus loop
    pub max_turns_per_persona: usize,
    /// Length constraint injected into every system prompt
    pub max_words_per_turn: usize,
    /// Chunks retrieved from the knowledge partition per turn
    pub retrieve_top_k: usize,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            max_turns_per_persona: 3,
            max_words_per_turn: 300,
            retrieve_top_k: 3,
        }
    }
}

impl DebateConfig {
    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns_per_persona = max;
        self
    }

    pub fn with_max_words(mut self, max: usize) -> Self {
        self.max_words_per_turn = max;
        self
    }

    pub fn with_retrieve_top_k(mut self, k: usize) -> Self {
        self.retrieve_top_k = k;
        self
    }

    /// Turn budget for one run. Overrides of zero or less are ignored.
    pub fn effective_max_turns(&self, override_turns: Option<i64>) -> usize {
        match override_turns {
            Some(n) if n > 0 => n as usize,
            _ => self.max_turns_per_persona,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = DebateConfig::default();
        assert_eq!(config.max_turns_per_persona, 3);
        assert_eq!(config.max_words_per_turn, 300);
        assert_eq!(config.retrieve_top_k, 3);
    }

    #[test]
    fn test_effective_max_turns() {
        let config = DebateConfig::default().with_max_turns(4);
        assert_eq!(config.effective_max_turns(None), 4);
        assert_eq!(config.effective_max_turns(Some(0)), 4);
        assert_eq!(config.effective_max_turns(Some(-2)), 4);
        assert_eq!(config.effective_max_turns(Some(6)), 6);
    }
}
