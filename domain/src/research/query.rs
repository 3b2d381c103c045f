//! Boolean search queries built from keyword phrases.

use super::keyword::KeywordPhrase;
use serde::{Deserialize, Serialize};

/// Word budget for the synonym-expansion query. Patent search backends
/// reject longer boolean expressions.
pub const EXPANSION_WORD_BUDGET: usize = 10;

/// How a query was produced. Ordered by descending expected precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStrategy {
    /// `(token OR syn1 OR syn2) AND (...)` over single topic tokens
    SynonymExpansion,
    /// Every extracted phrase, quoted and AND-joined
    ExactAnd,
    /// A single quoted alternative phrasing of the whole topic
    TopicSynonym,
    /// AND-joined phrases with exactly one phrase dropped
    Relaxation,
}

impl QueryStrategy {
    /// Priority label used in logs and reports (lower runs first).
    pub fn priority(&self) -> f32 {
        match self {
            QueryStrategy::SynonymExpansion => 0.0,
            QueryStrategy::ExactAnd => 1.0,
            QueryStrategy::TopicSynonym => 1.5,
            QueryStrategy::Relaxation => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStrategy::SynonymExpansion => "synonym_expansion",
            QueryStrategy::ExactAnd => "exact_and",
            QueryStrategy::TopicSynonym => "topic_synonym",
            QueryStrategy::Relaxation => "relaxation",
        }
    }
}

impl std::fmt::Display for QueryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A topic token together with its synonyms, rendered as one OR-group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermGroup {
    pub term: String,
    pub synonyms: Vec<String>,
}

impl TermGroup {
    pub fn new(term: impl Into<String>, synonyms: Vec<String>) -> Self {
        Self {
            term: term.into(),
            synonyms,
        }
    }
}

/// A boolean search expression (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    text: String,
    strategy: QueryStrategy,
}

impl SearchQuery {
    /// `"p1" AND "p2" AND ...`
    ///
    /// Never empty: with no phrases the query degenerates to `""`.
    pub fn exact_and(phrases: &[KeywordPhrase]) -> Self {
        Self {
            text: and_join(phrases),
            strategy: QueryStrategy::ExactAnd,
        }
    }

    /// Same rendering as [`SearchQuery::exact_and`] over an N-1 subset.
    pub fn relaxation(subset: &[KeywordPhrase]) -> Self {
        Self {
            text: and_join(subset),
            strategy: QueryStrategy::Relaxation,
        }
    }

    /// A single quoted phrase.
    pub fn topic_synonym(phrase: &str) -> Self {
        Self {
            text: format!("\"{}\"", phrase.trim().trim_matches('"')),
            strategy: QueryStrategy::TopicSynonym,
        }
    }

    /// `(token OR syn1 OR syn2) AND (...)`, capped at [`EXPANSION_WORD_BUDGET`] words.
    ///
    /// Tokens are admitted first, in order, while they fit the budget; the
    /// remaining budget is then filled with synonyms group by group. A group
    /// left with no synonyms renders as the bare token. Returns `None` when
    /// no group fits.
    pub fn synonym_expansion(groups: &[TermGroup]) -> Option<Self> {
        let mut words = 0;
        let mut admitted: Vec<(&TermGroup, Vec<&str>)> = Vec::new();

        for group in groups {
            let cost = word_count(&group.term);
            if cost == 0 || words + cost > EXPANSION_WORD_BUDGET {
                continue;
            }
            words += cost;
            admitted.push((group, Vec::new()));
        }

        if admitted.is_empty() {
            return None;
        }

        for (group, chosen) in admitted.iter_mut() {
            let group: &TermGroup = *group;
            for synonym in &group.synonyms {
                let cost = word_count(synonym);
                if cost == 0 || words + cost > EXPANSION_WORD_BUDGET {
                    continue;
                }
                words += cost;
                chosen.push(synonym.as_str());
            }
        }

        let text = admitted
            .iter()
            .map(|(group, synonyms)| {
                if synonyms.is_empty() {
                    render_term(&group.term)
                } else {
                    let alternatives: Vec<String> = std::iter::once(group.term.as_str())
                        .chain(synonyms.iter().copied())
                        .map(render_term)
                        .collect();
                    format!("({})", alternatives.join(" OR "))
                }
            })
            .collect::<Vec<_>>()
            .join(" AND ");

        Some(Self {
            text,
            strategy: QueryStrategy::SynonymExpansion,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn strategy(&self) -> QueryStrategy {
        self.strategy
    }

    /// Number of whitespace-separated words, ignoring operators and quotes.
    pub fn word_count(&self) -> usize {
        self.text
            .split_whitespace()
            .filter(|w| *w != "AND" && *w != "OR")
            .count()
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// All subsets of size N-1, in the order combinations are enumerated
/// (lexicographic by index): for `[a, b, c]` this is `[a, b], [a, c], [b, c]`.
pub fn relaxation_subsets(phrases: &[KeywordPhrase]) -> Vec<Vec<KeywordPhrase>> {
    if phrases.len() < 2 {
        return Vec::new();
    }
    (0..phrases.len())
        .rev()
        .map(|dropped| {
            phrases
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != dropped)
                .map(|(_, p)| p.clone())
                .collect()
        })
        .collect()
}

fn and_join(phrases: &[KeywordPhrase]) -> String {
    if phrases.is_empty() {
        return "\"\"".to_string();
    }
    phrases
        .iter()
        .map(KeywordPhrase::quoted)
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn render_term(term: &str) -> String {
    let term = term.trim().trim_matches('"');
    if term.contains(char::is_whitespace) {
        format!("\"{}\"", term)
    } else {
        term.to_string()
    }
}

fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}
