//! Keyword phrases and their extraction from LLM output.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Maximum number of phrases kept per topic.
pub const MAX_PHRASES: usize = 5;

/// Minimum phrase length (in chars) after trimming; shorter phrases are noise.
const MIN_PHRASE_CHARS: usize = 3;

static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]*)""#).expect("static regex is valid")
});

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-*\u{2022}]\s+|\d+[.)]\s+)").expect("static regex is valid")
});

/// Failure modes of the LLM-backed helpers.
///
/// None of these escape the helper boundary: each helper maps an error to
/// its documented fallback value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Model call failed: {0}")]
    ModelFailed(String),

    #[error("No usable phrases in model output")]
    NoPhrases,

    #[error("No valid selection in model output")]
    NoSelection,
}

/// An extracted technical phrase (Value Object)
///
/// Always longer than two characters and free of surrounding quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordPhrase(String);

impl KeywordPhrase {
    /// Create a phrase, returning `None` when it is too short after cleanup.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let cleaned = clean_phrase(raw.as_ref());
        if cleaned.chars().count() < MIN_PHRASE_CHARS {
            None
        } else {
            Some(Self(cleaned))
        }
    }

    /// Wrap text without validation. Used for the raw-topic fallback, which
    /// must survive even when it would not pass [`KeywordPhrase::new`].
    pub fn unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The phrase wrapped in double quotes for exact matching.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl std::fmt::Display for KeywordPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn clean_phrase(raw: &str) -> String {
    let unlisted = LIST_MARKER.replace(raw.trim(), "");
    unlisted
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '*')
        .trim()
        .to_string()
}

/// Parse the keyword-extraction response into at most [`MAX_PHRASES`] phrases.
///
/// Quoted groups (`"deep learning" "battery life"`) are preferred. When the
/// model ignored the quoting rule, the first non-empty line is split on
/// commas instead. Duplicates (case-insensitive) are dropped, order kept.
pub fn parse_keyword_response(raw: &str) -> Result<Vec<KeywordPhrase>, ExtractionError> {
    let raw = raw.replace("```", "");

    let mut candidates: Vec<String> = QUOTED
        .captures_iter(&raw)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect();

    if candidates.is_empty()
        && let Some(line) = raw.lines().map(str::trim).find(|l| !l.is_empty())
    {
        candidates = line.split([',', ';']).map(str::to_string).collect();
    }

    let mut phrases: Vec<KeywordPhrase> = Vec::new();
    for candidate in candidates {
        let Some(phrase) = KeywordPhrase::new(&candidate) else {
            continue;
        };
        let duplicate = phrases
            .iter()
            .any(|p| p.as_str().eq_ignore_ascii_case(phrase.as_str()));
        if !duplicate {
            phrases.push(phrase);
        }
        if phrases.len() == MAX_PHRASES {
            break;
        }
    }

    if phrases.is_empty() {
        Err(ExtractionError::NoPhrases)
    } else {
        Ok(phrases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_phrases() {
        let phrases = parse_keyword_response(r#""deep learning" "battery life prediction""#)
            .unwrap();
        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[0].as_str(), "deep learning");
        assert_eq!(phrases[1].as_str(), "battery life prediction");
    }

    #[test]
    fn test_parse_with_preamble() {
        let raw = "Here is the optimized query:\n\"ammonia\" \"cracking\"";
        let phrases = parse_keyword_response(raw).unwrap();
        assert_eq!(
            phrases.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            vec!["ammonia", "cracking"]
        );
    }

    #[test]
    fn test_parse_unquoted_comma_list() {
        let phrases = parse_keyword_response("zeolite catalysts, synthesis\nignored line").unwrap();
        assert_eq!(phrases[0].as_str(), "zeolite catalysts");
        assert_eq!(phrases[1].as_str(), "synthesis");
    }

    #[test]
    fn test_short_phrases_dropped() {
        let phrases = parse_keyword_response(r#""AI" "drug discovery" "ml""#).unwrap();
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].as_str(), "drug discovery");
    }

    #[test]
    fn test_capped_at_five_and_deduplicated() {
        let raw = r#""one1" "two2" "ONE1" "three" "four" "five" "six""#;
        let phrases = parse_keyword_response(raw).unwrap();
        assert_eq!(phrases.len(), MAX_PHRASES);
        assert_eq!(phrases[1].as_str(), "two2");
        assert!(!phrases.iter().any(|p| p.as_str() == "six"));
    }

    #[test]
    fn test_empty_output_is_error() {
        assert_eq!(parse_keyword_response(""), Err(ExtractionError::NoPhrases));
        assert_eq!(parse_keyword_response(r#""" "x""#), Err(ExtractionError::NoPhrases));
    }

    #[test]
    fn test_list_markers_stripped_but_leading_digits_kept() {
        let phrases = parse_keyword_response("1. 3D printing, - lattice design").unwrap();
        assert_eq!(phrases[0].as_str(), "3D printing");
        assert_eq!(phrases[1].as_str(), "lattice design");
    }

    #[test]
    fn test_quoted_rendering() {
        let p = KeywordPhrase::new("'ammonia'").unwrap();
        assert_eq!(p.quoted(), "\"ammonia\"");
    }
}
