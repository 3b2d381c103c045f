//! Raw TOML configuration data types
//!
//! These structs mirror the TOML file. Conversions into the plain config
//! structs the application layer takes (`DebateConfig`, `ResearchConfig`,
//! `PersonaRegistry`) live next to each section.

mod debate;
mod knowledge;
mod llm;
mod personas;
mod report;
mod research;
mod sources;

pub use debate::FileDebateConfig;
pub use knowledge::{EmbedderKind, FileKnowledgeConfig};
pub use llm::FileLlmConfig;
pub use personas::{FilePersonaConfig, build_registry};
pub use report::FileReportConfig;
pub use research::FileResearchConfig;
pub use sources::{FileOpenAlexConfig, FileSourcesConfig, FileTavilyConfig, FileUsptoConfig};

use super::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use vte_application::{DebateConfig, ResearchConfig};
use vte_domain::{DebateMode, PersonaRegistry};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Ollama connection and model names
    pub llm: FileLlmConfig,
    /// Debate engine settings
    pub debate: FileDebateConfig,
    /// Fetch limits
    pub research: FileResearchConfig,
    /// External research sources
    pub sources: FileSourcesConfig,
    /// Vector store location and embedder
    pub knowledge: FileKnowledgeConfig,
    /// Report output
    pub report: FileReportConfig,
    /// Persona overrides and additions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub personas: Vec<FilePersonaConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.llm.chat_model.trim().is_empty() {
            issues.push(ConfigIssue::empty("llm.chat_model"));
        }
        if self.llm.base_url.trim().is_empty() {
            issues.push(ConfigIssue::empty("llm.base_url"));
        }

        issues.extend(self.debate.parse_default_mode().1);
        issues.extend(self.debate.to_debate_config().1);
        issues.extend(self.research.to_research_config().1);
        issues.extend(self.knowledge.parse_embedder().1);
        issues.extend(build_registry(&self.personas).1);

        issues
    }

    pub fn debate_config(&self) -> DebateConfig {
        self.debate.to_debate_config().0
    }

    pub fn research_config(&self) -> ResearchConfig {
        self.research.to_research_config().0
    }

    pub fn default_mode(&self) -> DebateMode {
        self.debate.parse_default_mode().0
    }

    pub fn persona_registry(&self) -> PersonaRegistry {
        build_registry(&self.personas).0
    }

    pub fn embedder(&self) -> EmbedderKind {
        self.knowledge.parse_embedder().0
    }
}
