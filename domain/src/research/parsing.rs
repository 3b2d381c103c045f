//! Parsing of free-form LLM output for the query synthesizer.
//!
//! Pure text handling, no I/O. Each function reports an
//! [`ExtractionError`] when the output is unusable so the caller can apply
//! its deterministic fallback.
//!
//! | Function | Used by | Fallback applied by caller |
//! |----------|---------|----------------------------|
//! | [`parse_synonym_list`] | token / topic synonym helpers | empty list |
//! | [`parse_index_list`] | combination ranking | first N combinations |

use super::keyword::ExtractionError;
use regex::Regex;
use std::sync::LazyLock;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("static regex is valid"));

/// Parse up to `max` synonyms from a comma- or newline-separated response.
///
/// Bullets, numbering and quotes are stripped. Entries equal to `exclude`
/// (case-insensitive, typically the source term itself) are skipped, as are
/// duplicates and lines that look like prose (more than six words).
pub fn parse_synonym_list(
    raw: &str,
    exclude: &str,
    max: usize,
) -> Result<Vec<String>, ExtractionError> {
    let mut synonyms: Vec<String> = Vec::new();

    for item in raw.replace("```", "").split(['\n', ',', ';']) {
        let cleaned = item
            .trim()
            .trim_start_matches(|c: char| c == '-' || c == '*' || c == '\u{2022}')
            .trim();
        let cleaned = strip_numbering(cleaned)
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
            .trim();

        if cleaned.chars().count() < 2 || cleaned.split_whitespace().count() > 6 {
            continue;
        }
        if cleaned.ends_with(':') || cleaned.eq_ignore_ascii_case(exclude) {
            continue;
        }
        if synonyms.iter().any(|s| s.eq_ignore_ascii_case(cleaned)) {
            continue;
        }

        synonyms.push(cleaned.to_string());
        if synonyms.len() == max {
            break;
        }
    }

    if synonyms.is_empty() {
        Err(ExtractionError::NoPhrases)
    } else {
        Ok(synonyms)
    }
}

/// Parse 1-based indices from a ranking response.
///
/// Integers are read in order of appearance; out-of-range values (0 or
/// greater than `candidates`) and repeats are discarded. At most `max`
/// zero-based indices are returned.
pub fn parse_index_list(
    raw: &str,
    candidates: usize,
    max: usize,
) -> Result<Vec<usize>, ExtractionError> {
    let mut indices = Vec::new();

    for m in INTEGER.find_iter(raw) {
        let Ok(n) = m.as_str().parse::<usize>() else {
            continue;
        };
        if n == 0 || n > candidates {
            continue;
        }
        let idx = n - 1;
        if !indices.contains(&idx) {
            indices.push(idx);
        }
        if indices.len() == max {
            break;
        }
    }

    if indices.is_empty() {
        Err(ExtractionError::NoSelection)
    } else {
        Ok(indices)
    }
}

fn strip_numbering(s: &str) -> &str {
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return s;
    }
    let rest = &s[digits..];
    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        Some(after) => after.trim_start(),
        None => s,
    }
}
