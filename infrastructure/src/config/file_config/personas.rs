//! Persona overrides from TOML (`[[personas]]` tables)
//!
//! Each entry replaces the built-in persona with the same key or adds a
//! new one.
//!
//! ```toml
//! [[personas]]
//! key = "P_SKEP"
//! name = "Procurement Skeptic"
//! system_prompt = "You are a procurement officer..."
//! instruction = "Critique the proposal on supply risk."
//! ```

use super::super::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use vte_domain::{Persona, PersonaRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePersonaConfig {
    pub key: String,
    pub name: String,
    pub system_prompt: String,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

impl FilePersonaConfig {
    fn to_persona(&self) -> Persona {
        let persona = Persona::new(
            self.key.trim(),
            self.name.trim(),
            &*self.system_prompt,
            &*self.instruction,
        );
        match &self.follow_up {
            Some(follow_up) => persona.with_follow_up(follow_up.as_str()),
            None => persona,
        }
    }
}

/// Built-in personas with the valid overrides applied.
///
/// Entries with a blank key or name are skipped and reported.
pub fn build_registry(overrides: &[FilePersonaConfig]) -> (PersonaRegistry, Vec<ConfigIssue>) {
    let mut issues = Vec::new();
    let mut valid = Vec::new();
    for (i, entry) in overrides.iter().enumerate() {
        if entry.key.trim().is_empty() {
            issues.push(ConfigIssue::empty(&format!("personas[{}].key", i)));
        } else if entry.name.trim().is_empty() {
            issues.push(ConfigIssue::empty(&format!("personas[{}].name", i)));
        } else {
            valid.push(entry.to_persona());
        }
    }
    (PersonaRegistry::default().with_overrides(valid), issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vte_domain::PersonaKey;

    fn entry(key: &str, name: &str) -> FilePersonaConfig {
        FilePersonaConfig {
            key: key.into(),
            name: name.into(),
            system_prompt: "You are careful.".into(),
            instruction: "Review {topic}.".into(),
            follow_up: None,
        }
    }

    #[test]
    fn test_override_replaces_builtin() {
        let (registry, issues) = build_registry(&[entry("P_SKEP", "Procurement Skeptic")]);
        assert!(issues.is_empty());
        assert_eq!(registry.len(), 5);
        let skeptic = registry.get(&PersonaKey::skeptic()).unwrap();
        assert_eq!(skeptic.name, "Procurement Skeptic");
        assert_eq!(skeptic.instruction_for("ammonia", false), "Review ammonia.");
    }

    #[test]
    fn test_new_persona_is_added_and_blank_rejected() {
        let (registry, issues) = build_registry(&[entry("P_ENV", "Environmentalist"), entry(" ", "x")]);
        assert_eq!(registry.len(), 6);
        assert!(registry.get(&PersonaKey::new("P_ENV")).is_some());
        assert_eq!(issues.len(), 1);
    }
}
