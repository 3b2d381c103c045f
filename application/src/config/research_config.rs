//! Research pipeline parameters.

use serde::{Deserialize, Serialize};
use vte_domain::SourceCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Document limit for paper and patent sources
    pub per_source_limit: usize,
    /// Document limit for news sources
    pub news_limit: usize,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            per_source_limit: 20,
            news_limit: 10,
        }
    }
}

impl ResearchConfig {
    /// Use one limit for every non-news source.
    pub fn with_per_source_limit(mut self, limit: usize) -> Self {
        self.per_source_limit = limit;
        self
    }

    pub fn with_news_limit(mut self, limit: usize) -> Self {
        self.news_limit = limit;
        self
    }

    pub fn limit_for(&self, category: SourceCategory) -> usize {
        match category {
            SourceCategory::News => self.news_limit,
            SourceCategory::Article | SourceCategory::Patent => self.per_source_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_for() {
        let config = ResearchConfig::default().with_per_source_limit(30);
        assert_eq!(config.limit_for(SourceCategory::Article), 30);
        assert_eq!(config.limit_for(SourceCategory::Patent), 30);
        assert_eq!(config.limit_for(SourceCategory::News), 10);
    }
}
