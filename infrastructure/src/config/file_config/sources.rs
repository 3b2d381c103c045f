//! Research source configuration from TOML (`[sources.*]` sections)
//!
//! API keys never live in the file; each keyed source names the
//! environment variable to read instead.
//!
//! ```toml
//! [sources.openalex]
//! user_agent_email = "me@example.com"
//!
//! [sources.uspto]
//! api_key_env = "USPTO_API_KEY"
//!
//! [sources.tavily]
//! enabled = false
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSourcesConfig {
    pub openalex: FileOpenAlexConfig,
    pub uspto: FileUsptoConfig,
    pub tavily: FileTavilyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAlexConfig {
    pub enabled: bool,
    pub base_url: String,
    /// Sent as `mailto:` for the polite pool
    pub user_agent_email: String,
    /// Lower bound for `from_publication_date`
    pub from_publication_date: String,
}

impl Default for FileOpenAlexConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.openalex.org/works".to_string(),
            user_agent_email: "research-agent@example.com".to_string(),
            from_publication_date: "2020-01-01".to_string(),
        }
    }
}

/// PatentsView (USPTO) patent search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUsptoConfig {
    pub enabled: bool,
    pub base_url: String,
    pub api_key_env: String,
}

impl Default for FileUsptoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://search.patentsview.org/api/v1/patent/".to_string(),
            api_key_env: "USPTO_API_KEY".to_string(),
        }
    }
}

impl FileUsptoConfig {
    pub fn api_key(&self) -> Option<String> {
        api_key_from_env(&self.api_key_env)
    }
}

/// Tavily news search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTavilyConfig {
    pub enabled: bool,
    pub base_url: String,
    pub api_key_env: String,
}

impl Default for FileTavilyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.tavily.com/search".to_string(),
            api_key_env: "TAVILY_API_KEY".to_string(),
        }
    }
}

impl FileTavilyConfig {
    pub fn api_key(&self) -> Option<String> {
        api_key_from_env(&self.api_key_env)
    }
}

/// The value of `var`, if set and non-blank.
fn api_key_from_env(var: &str) -> Option<String> {
    if var.trim().is_empty() {
        return None;
    }
    std::env::var(var)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}
