//! Topic value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Function words and research filler ignored when counting core words.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "of", "for", "in", "on", "at", "to", "by", "with", "from",
    "into", "onto", "via", "as", "is", "are", "be", "its", "it", "this", "that", "these",
    "those", "about", "over", "under", "between", "through", "towards", "toward", "i", "we",
    "want", "would", "like", "how", "what", "which", "study", "studies", "research",
    "analysis", "method", "methods", "methodology", "approach", "using", "use", "based",
    "improve", "improving", "new", "novel",
];

/// A research topic (Value Object)
///
/// The free-text input that scopes one knowledge partition. Immutable once
/// created; surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    content: String,
}

impl Topic {
    /// Create a new topic, rejecting empty or whitespace-only input.
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidTopic("topic cannot be empty".to_string()));
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the topic text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whitespace-separated word count of the raw topic.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Topic tokens left after stop-word removal, in original order.
    ///
    /// Tokens are stripped of surrounding punctuation; hyphenated words are
    /// kept whole ("nickel-rich").
    pub fn core_words(&self) -> Vec<String> {
        self.content
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
            .filter(|w| !w.is_empty())
            .filter(|w| !is_stop_word(w))
            .map(str::to_string)
            .collect()
    }

    /// Number of core words (see [`Topic::core_words`]).
    pub fn core_word_count(&self) -> usize {
        self.core_words().len()
    }
}

/// Case-insensitive stop-word check.
pub fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Topic {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Topic::new(s)
    }
}
