//! Debate modes.
//!
//! - Sequential (`a`): Optimist → Skeptic → Moderator
//! - RoundRobin (`b`): Optimist → Competitor → Skeptic → Regulator → Moderator
//! - Consensus (`c`): Optimist ↔ Skeptic until the turn budget is spent, then Moderator

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateMode {
    #[default]
    Sequential,
    RoundRobin,
    Consensus,
}

impl DebateMode {
    /// Single-letter CLI code
    pub fn letter(&self) -> char {
        match self {
            DebateMode::Sequential => 'a',
            DebateMode::RoundRobin => 'b',
            DebateMode::Consensus => 'c',
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DebateMode::Sequential => "Sequential: Optimist, Skeptic, Moderator",
            DebateMode::RoundRobin => {
                "Round-robin: Optimist, Competitor, Skeptic, Regulator, Moderator"
            }
            DebateMode::Consensus => "Consensus loop: Optimist and Skeptic alternate, Moderator closes",
        }
    }

    /// Whether the number of turns depends on the per-persona budget
    pub fn is_bounded_loop(&self) -> bool {
        matches!(self, DebateMode::Consensus)
    }
}

impl fmt::Display for DebateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebateMode::Sequential => write!(f, "sequential"),
            DebateMode::RoundRobin => write!(f, "round-robin"),
            DebateMode::Consensus => write!(f, "consensus"),
        }
    }
}

impl std::str::FromStr for DebateMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "sequential" | "seq" => Ok(DebateMode::Sequential),
            "b" | "round-robin" | "round_robin" | "roundrobin" | "parallel" => {
                Ok(DebateMode::RoundRobin)
            }
            "c" | "consensus" => Ok(DebateMode::Consensus),
            _ => Err(DomainError::UnknownMode(s.to_string())),
        }
    }
}
