//! Document counts per source category

use serde::Serialize;
use vte_application::ResearchOutcome;
use vte_domain::{ExpertSummary, SourceCategory};

/// How many documents backed the debate, by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DataStats {
    pub articles: usize,
    pub patents: usize,
    pub news: usize,
    pub total: usize,
}

impl DataStats {
    fn count(&mut self, category: SourceCategory) {
        match category {
            SourceCategory::Article => self.articles += 1,
            SourceCategory::Patent => self.patents += 1,
            SourceCategory::News => self.news += 1,
        }
        self.total += 1;
    }
}

impl From<&ResearchOutcome> for DataStats {
    fn from(outcome: &ResearchOutcome) -> Self {
        let mut stats = DataStats::default();
        for doc in &outcome.documents {
            stats.count(SourceCategory::from_source(&doc.source));
        }
        stats
    }
}

impl From<&ExpertSummary> for DataStats {
    fn from(summary: &ExpertSummary) -> Self {
        Self {
            articles: summary.articles,
            patents: summary.patents,
            news: summary.news,
            total: summary.doc_count,
        }
    }
}
