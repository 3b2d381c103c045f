//! Research configuration from TOML (`[research]` section)

use super::super::issue::ConfigIssue;
use serde::{Deserialize, Serialize};
use vte_application::ResearchConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResearchConfig {
    /// Documents collected per paper or patent source
    pub per_source_limit: usize,
    /// Documents collected from the news source
    pub news_limit: usize,
}

impl Default for FileResearchConfig {
    fn default() -> Self {
        let defaults = ResearchConfig::default();
        Self {
            per_source_limit: defaults.per_source_limit,
            news_limit: defaults.news_limit,
        }
    }
}

impl FileResearchConfig {
    pub fn to_research_config(&self) -> (ResearchConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.per_source_limit == 0 {
            issues.push(ConfigIssue::zero("research.per_source_limit"));
        }
        if self.news_limit == 0 {
            issues.push(ConfigIssue::zero("research.news_limit"));
        }
        // a zero limit disables fetching from that kind of source
        let config = ResearchConfig::default()
            .with_per_source_limit(self.per_source_limit)
            .with_news_limit(self.news_limit);
        (config, issues)
    }
}
