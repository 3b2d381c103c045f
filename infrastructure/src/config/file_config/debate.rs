//! Debate configuration from TOML (`[debate]` section)

use super::super::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use vte_application::DebateConfig;
use vte_domain::DebateMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    pub max_turns_per_persona: usize,
    pub max_words_per_turn: usize,
    pub retrieve_top_k: usize,
    /// `a`, `b` or `c` (long names accepted)
    pub default_mode: String,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        let defaults = DebateConfig::default();
        Self {
            max_turns_per_persona: defaults.max_turns_per_persona,
            max_words_per_turn: defaults.max_words_per_turn,
            retrieve_top_k: defaults.retrieve_top_k,
            default_mode: "a".to_string(),
        }
    }
}

impl FileDebateConfig {
    /// Parse `default_mode`, falling back to sequential.
    pub fn parse_default_mode(&self) -> (DebateMode, Vec<ConfigIssue>) {
        match self.default_mode.parse::<DebateMode>() {
            Ok(mode) => (mode, Vec::new()),
            Err(_) => (
                DebateMode::default(),
                vec![ConfigIssue::invalid_enum(
                    "debate.default_mode",
                    &self.default_mode,
                    &["a", "b", "c"],
                    "a",
                )],
            ),
        }
    }

    /// Zero values fall back to the built-in defaults.
    pub fn to_debate_config(&self) -> (DebateConfig, Vec<ConfigIssue>) {
        let defaults = DebateConfig::default();
        let mut issues = Vec::new();
        let mut pick = |field: &str, value: usize, default: usize| {
            if value == 0 {
                issues.push(ConfigIssue::zero(field));
                default
            } else {
                value
            }
        };

        let config = DebateConfig::default()
            .with_max_turns(pick(
                "debate.max_turns_per_persona",
                self.max_turns_per_persona,
                defaults.max_turns_per_persona,
            ))
            .with_max_words(pick(
                "debate.max_words_per_turn",
                self.max_words_per_turn,
                defaults.max_words_per_turn,
            ))
            .with_retrieve_top_k(pick(
                "debate.retrieve_top_k",
                self.retrieve_top_k,
                defaults.retrieve_top_k,
            ));
        (config, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_turns_falls_back() {
        let file = FileDebateConfig {
            max_turns_per_persona: 0,
            ..Default::default()
        };
        let (config, issues) = file.to_debate_config();
        assert_eq!(config.max_turns_per_persona, 3);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_parse_default_mode() {
        let file = FileDebateConfig {
            default_mode: "consensus".into(),
            ..Default::default()
        };
        assert_eq!(file.parse_default_mode().0, DebateMode::Consensus);

        let bad = FileDebateConfig {
            default_mode: "z".into(),
            ..Default::default()
        };
        let (mode, issues) = bad.parse_default_mode();
        assert_eq!(mode, DebateMode::Sequential);
        assert_eq!(issues.len(), 1);
    }
}
