//! Persona definitions and the persona table.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key of a persona in the [`PersonaRegistry`] (e.g. `P_OPT`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaKey(String);

impl PersonaKey {
    pub const OPTIMIST: &'static str = "P_OPT";
    pub const SKEPTIC: &'static str = "P_SKEP";
    pub const COMPETITOR: &'static str = "P_COMP";
    pub const REGULATOR: &'static str = "P_REG";
    pub const MODERATOR: &'static str = "P_MOD";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn optimist() -> Self {
        Self::new(Self::OPTIMIST)
    }

    pub fn skeptic() -> Self {
        Self::new(Self::SKEPTIC)
    }

    pub fn competitor() -> Self {
        Self::new(Self::COMPETITOR)
    }

    pub fn regulator() -> Self {
        Self::new(Self::REGULATOR)
    }

    pub fn moderator() -> Self {
        Self::new(Self::MODERATOR)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonaKey {
    fn from(s: &str) -> Self {
        PersonaKey::new(s)
    }
}

/// A named dialogue role.
///
/// `instruction` is the human turn appended after the transcript; `{topic}`
/// is substituted. When `follow_up` is set it replaces `instruction` on
/// every turn after the first message of the debate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub key: PersonaKey,
    pub name: String,
    pub system_prompt: String,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

impl Persona {
    pub fn new(
        key: impl Into<PersonaKey>,
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            system_prompt: system_prompt.into(),
            instruction: instruction.into(),
            follow_up: None,
        }
    }

    pub fn with_follow_up(mut self, follow_up: impl Into<String>) -> Self {
        self.follow_up = Some(follow_up.into());
        self
    }

    /// The instruction for this turn. `opening` is true while the
    /// transcript is still empty.
    pub fn instruction_for(&self, topic: &str, opening: bool) -> String {
        let template = match (&self.follow_up, opening) {
            (Some(follow_up), false) => follow_up,
            _ => &self.instruction,
        };
        template.replace("{topic}", topic)
    }
}

/// Persona table keyed by [`PersonaKey`].
///
/// Starts from the five built-in roles; entries can be replaced or added
/// at runtime (config file, UI).
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: HashMap<PersonaKey, Persona>,
}

impl PersonaRegistry {
    pub fn empty() -> Self {
        Self {
            personas: HashMap::new(),
        }
    }

    /// Insert or replace a persona. Returns the previous entry for the key.
    pub fn insert(&mut self, persona: Persona) -> Option<Persona> {
        self.personas.insert(persona.key.clone(), persona)
    }

    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = Persona>) -> Self {
        for persona in overrides {
            self.insert(persona);
        }
        self
    }

    pub fn get(&self, key: &PersonaKey) -> Option<&Persona> {
        self.personas.get(key)
    }

    pub fn require(&self, key: &PersonaKey) -> Result<&Persona, DomainError> {
        self.get(key)
            .ok_or_else(|| DomainError::UnknownPersona(key.to_string()))
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&PersonaKey> {
        let mut keys: Vec<_> = self.personas.keys().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::empty().with_overrides(builtin_personas())
    }
}

fn builtin_personas() -> Vec<Persona> {
    vec![
        Persona::new(
            PersonaKey::OPTIMIST,
            "Tech Optimist",
            "You are a technology optimist and early adopter. You argue for the \
             potential of the technology under discussion, citing evidence of \
             progress, market opportunity and practical benefits. Ground every \
             claim in the provided context where possible.",
            "Propose/Defend {topic}.",
        )
        .with_follow_up("Respond to the critique."),
        Persona::new(
            PersonaKey::SKEPTIC,
            "Cost Skeptic",
            "You are a pragmatic skeptic focused on cost, scalability and risk. \
             You challenge optimistic claims, point out technical bottlenecks and \
             economic barriers, and ask for evidence.",
            "Critique the proposal based on costs/risks.",
        ),
        Persona::new(
            PersonaKey::COMPETITOR,
            "Competitor Analyst",
            "You are a strategy analyst at a competing firm. You compare the \
             proposal against alternative technologies and incumbent solutions \
             and look for weaknesses in its competitive position.",
            "Critique from a competitor's view. What are the weaknesses?",
        ),
        Persona::new(
            PersonaKey::REGULATOR,
            "Regulatory Expert",
            "You are a regulatory and compliance expert. You assess safety \
             standards, permitting, liability and intellectual property risks \
             that could block or delay adoption.",
            "Analyze legal/compliance risks.",
        ),
        Persona::new(
            PersonaKey::MODERATOR,
            "Moderator",
            "You are a neutral moderator. You summarize the strongest arguments \
             on each side, identify points of agreement and open questions, and \
             give a balanced conclusion.",
            "Synthesize the debate so far and provide a conclusion.",
        ),
    ]
}
