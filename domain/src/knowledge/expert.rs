//! Expert partition identifiers and summaries.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

const PREFIX: &str = "expert_";

/// Identifier of one expert partition (Value Object)
///
/// Generated ids have the form `expert_<n>`. Ids with other shapes are
/// accepted (older partitions, hand-named ones) but never participate in
/// numbering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpertId(String);

impl ExpertId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return Err(DomainError::InvalidExpertId(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// `expert_<n>`
    pub fn numbered(n: u64) -> Self {
        Self(format!("{PREFIX}{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `n` of `expert_<n>`, if this id follows the numbered pattern.
    pub fn number(&self) -> Option<u64> {
        numeric_suffix(&self.0)
    }

    /// One greater than the highest numbered id observed, `expert_1` if none.
    ///
    /// Gaps are tolerated and never refilled, so ids stay monotonic even
    /// when partitions are deleted out of order (unless the maximum itself
    /// is deleted).
    pub fn next_after<'a>(existing: impl IntoIterator<Item = &'a str>) -> Self {
        let max = existing
            .into_iter()
            .filter_map(numeric_suffix)
            .max()
            .unwrap_or(0);
        Self::numbered(max.saturating_add(1))
    }
}

fn numeric_suffix(id: &str) -> Option<u64> {
    let digits = id.strip_prefix(PREFIX)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl std::fmt::Display for ExpertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ExpertId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpertId::new(s)
    }
}

/// Per-partition overview used by the `--list` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertSummary {
    pub expert_id: ExpertId,
    pub topic: String,
    pub doc_count: usize,
    pub articles: usize,
    pub patents: usize,
    pub news: usize,
}

impl ExpertSummary {
    pub fn new(expert_id: ExpertId, topic: impl Into<String>) -> Self {
        Self {
            expert_id,
            topic: topic.into(),
            doc_count: 0,
            articles: 0,
            patents: 0,
            news: 0,
        }
    }
}
