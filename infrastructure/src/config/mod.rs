//! Configuration file loading for vte
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `VTE_`-prefixed environment variables (`VTE_LLM__BASE_URL`, ...)
//! 2. `--config <path>` specified file
//! 3. Project root: `./vte.toml` or `./.vte.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/vte/config.toml`
//! 5. Default values

mod file_config;
mod issue;
mod loader;

pub use file_config::{
    EmbedderKind, FileConfig, FileDebateConfig, FileKnowledgeConfig, FileLlmConfig,
    FileOpenAlexConfig, FilePersonaConfig, FileReportConfig, FileResearchConfig,
    FileSourcesConfig, FileTavilyConfig, FileUsptoConfig,
};
pub use issue::{ConfigIssue, ConfigIssueCode, Severity};
pub use loader::{ConfigError, ConfigLoader};
