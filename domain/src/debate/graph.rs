//! Speaker transition graphs.
//!
//! Each mode is a static edge table. Mode C additionally routes through
//! [`consensus_route`] after the Optimist and Skeptic turns.

use super::mode::DebateMode;
use super::persona::PersonaKey;
use crate::core::error::DomainError;

/// What happens after a persona has spoken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Speaker(PersonaKey),
    Terminal,
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    To(&'static str),
    Route,
    End,
}

const SEQUENTIAL: &[(&str, Edge)] = &[
    (PersonaKey::OPTIMIST, Edge::To(PersonaKey::SKEPTIC)),
    (PersonaKey::SKEPTIC, Edge::To(PersonaKey::MODERATOR)),
    (PersonaKey::MODERATOR, Edge::End),
];

const ROUND_ROBIN: &[(&str, Edge)] = &[
    (PersonaKey::OPTIMIST, Edge::To(PersonaKey::COMPETITOR)),
    (PersonaKey::COMPETITOR, Edge::To(PersonaKey::SKEPTIC)),
    (PersonaKey::SKEPTIC, Edge::To(PersonaKey::REGULATOR)),
    (PersonaKey::REGULATOR, Edge::To(PersonaKey::MODERATOR)),
    (PersonaKey::MODERATOR, Edge::End),
];

const CONSENSUS: &[(&str, Edge)] = &[
    (PersonaKey::OPTIMIST, Edge::Route),
    (PersonaKey::SKEPTIC, Edge::Route),
    (PersonaKey::MODERATOR, Edge::End),
];

/// Transition graph for one debate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebateGraph {
    mode: DebateMode,
    max_turns: usize,
}

impl DebateGraph {
    /// `max_turns` is the per-persona budget used by the consensus loop.
    /// Values below 1 are raised to 1 so the loop always has both sides speak.
    pub fn new(mode: DebateMode, max_turns: usize) -> Self {
        Self {
            mode,
            max_turns: max_turns.max(1),
        }
    }

    pub fn mode(&self) -> DebateMode {
        self.mode
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// First speaker. Every mode opens with the Optimist.
    pub fn entry(&self) -> PersonaKey {
        PersonaKey::optimist()
    }

    /// Upper bound on the number of turns a run can take.
    pub fn turn_limit(&self) -> usize {
        match self.mode {
            DebateMode::Sequential => SEQUENTIAL.len(),
            DebateMode::RoundRobin => ROUND_ROBIN.len(),
            DebateMode::Consensus => self.max_turns.saturating_mul(2).saturating_add(1),
        }
    }

    /// Next transition after `current` has spoken, with `turn_count` turns
    /// now completed.
    pub fn next(&self, current: &PersonaKey, turn_count: usize) -> Result<Transition, DomainError> {
        let edge = self
            .edges()
            .iter()
            .find(|(from, _)| *from == current.as_str())
            .map(|(_, edge)| *edge)
            .ok_or_else(|| DomainError::UnknownPersona(current.to_string()))?;

        Ok(match edge {
            Edge::To(key) => Transition::Speaker(PersonaKey::new(key)),
            Edge::Route => consensus_route(current, turn_count, self.max_turns),
            Edge::End => Transition::Terminal,
        })
    }

    /// Every persona key that can appear in this graph.
    pub fn participants(&self) -> Vec<PersonaKey> {
        self.edges()
            .iter()
            .map(|(key, _)| PersonaKey::new(*key))
            .collect()
    }

    fn edges(&self) -> &'static [(&'static str, Edge)] {
        match self.mode {
            DebateMode::Sequential => SEQUENTIAL,
            DebateMode::RoundRobin => ROUND_ROBIN,
            DebateMode::Consensus => CONSENSUS,
        }
    }
}

/// Mode C router: hand over to the Moderator once `turn_count` reaches
/// `2 * max_turns`, otherwise alternate Optimist and Skeptic.
pub fn consensus_route(current: &PersonaKey, turn_count: usize, max_turns: usize) -> Transition {
    if turn_count >= max_turns.saturating_mul(2) {
        return Transition::Speaker(PersonaKey::moderator());
    }
    if current.as_str() == PersonaKey::OPTIMIST {
        Transition::Speaker(PersonaKey::skeptic())
    } else {
        Transition::Speaker(PersonaKey::optimist())
    }
}
