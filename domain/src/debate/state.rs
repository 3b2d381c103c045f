//! Debate state: the transcript and the turn counter.

use super::mode::DebateMode;
use super::persona::{Persona, PersonaKey};
use crate::knowledge::expert::ExpertId;
use serde::{Deserialize, Serialize};

/// Speaker recorded before any persona has spoken.
pub const INITIAL_SPEAKER: &str = "System";

/// One persona contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateMessage {
    /// Display name of the persona
    pub speaker: String,
    pub persona_key: PersonaKey,
    pub content: String,
}

/// State of one debate run.
///
/// `messages` is append-only and `turn_count == messages.len()` at all
/// times; [`DebateState::record_turn`] is the only way to add a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateState {
    topic: String,
    expert_id: ExpertId,
    messages: Vec<DebateMessage>,
    turn_count: usize,
    mode: DebateMode,
    active_speaker: String,
}

impl DebateState {
    pub fn new(topic: impl Into<String>, expert_id: ExpertId, mode: DebateMode) -> Self {
        Self {
            topic: topic.into(),
            expert_id,
            messages: Vec::new(),
            turn_count: 0,
            mode,
            active_speaker: INITIAL_SPEAKER.to_string(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn expert_id(&self) -> &ExpertId {
        &self.expert_id
    }

    pub fn messages(&self) -> &[DebateMessage] {
        &self.messages
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    pub fn mode(&self) -> DebateMode {
        self.mode
    }

    /// Key of the persona that spoke last, or `"System"` before the first turn.
    pub fn active_speaker(&self) -> &str {
        &self.active_speaker
    }

    pub fn last_message(&self) -> Option<&DebateMessage> {
        self.messages.last()
    }

    pub fn is_opening(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append one persona's contribution and advance the turn counter.
    pub fn record_turn(&mut self, persona: &Persona, content: impl Into<String>) {
        self.messages.push(DebateMessage {
            speaker: persona.name.clone(),
            persona_key: persona.key.clone(),
            content: content.into(),
        });
        self.turn_count += 1;
        self.active_speaker = persona.key.to_string();
    }
}
