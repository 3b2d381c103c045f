//! Report writer
//!
//! Each run produces `<YYYYmmdd_HHMMSS>_<topic>.md` and a matching `.json`
//! in the output directory.

use super::stats::DataStats;
use chrono::{DateTime, Local};
use regex::Regex;
use serde_json::json;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use vte_domain::{DebateState, PersonaKey};

const MAX_TOPIC_CHARS: usize = 50;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid regex"));

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create report directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Files written for one run
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub markdown: PathBuf,
    pub json: PathBuf,
}

/// File-name-safe form of a topic: runs of non-alphanumerics become one
/// `_`, edges are trimmed, at most 50 characters.
pub fn safe_topic(topic: &str) -> String {
    let replaced = NON_WORD.replace_all(topic, "_");
    let trimmed: String = replaced
        .trim_matches('_')
        .chars()
        .take(MAX_TOPIC_CHARS)
        .collect();
    let trimmed = trimmed.trim_end_matches('_');
    if trimmed.is_empty() {
        "report".to_string()
    } else {
        trimmed.to_string()
    }
}

pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write both report files, creating the output directory if needed.
    pub fn write(
        &self,
        state: &DebateState,
        stats: &DataStats,
        generated_at: DateTime<Local>,
    ) -> Result<ReportPaths, ReportError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let stem = format!(
            "{}_{}",
            generated_at.format("%Y%m%d_%H%M%S"),
            safe_topic(state.topic())
        );
        let paths = ReportPaths {
            markdown: self.output_dir.join(format!("{}.md", stem)),
            json: self.output_dir.join(format!("{}.json", stem)),
        };

        write_file(&paths.markdown, &render_markdown(state, stats, generated_at))?;

        let dump = json!({
            "topic": state.topic(),
            "expert_id": state.expert_id(),
            "mode": state.mode(),
            "generated_at": generated_at.to_rfc3339(),
            "data_stats": stats,
            "state": state,
        });
        write_file(&paths.json, &serde_json::to_string_pretty(&dump)?)?;

        Ok(paths)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ReportError> {
    std::fs::write(path, content).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Markdown rendering of the debate. Interrupted runs (no closing
/// moderator turn) get a note instead of a conclusion.
pub fn render_markdown(state: &DebateState, stats: &DataStats, generated_at: DateTime<Local>) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Technology Evaluation: {}\n", state.topic());
    let _ = writeln!(md, "- **Generated:** {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(md, "- **Expert:** `{}`", state.expert_id());
    let _ = writeln!(md, "- **Mode:** {} ({})", state.mode(), state.mode().letter());
    let _ = writeln!(md, "- **Turns:** {}\n", state.turn_count());

    md.push_str("## Data Sources\n\n");
    md.push_str("| Category | Documents |\n|---|---:|\n");
    let _ = writeln!(md, "| Articles | {} |", stats.articles);
    let _ = writeln!(md, "| Patents | {} |", stats.patents);
    let _ = writeln!(md, "| News | {} |", stats.news);
    let _ = writeln!(md, "| **Total** | **{}** |\n", stats.total);

    md.push_str("## Debate Transcript\n\n");
    for (i, message) in state.messages().iter().enumerate() {
        let _ = writeln!(md, "### {}. {}\n", i + 1, message.speaker);
        let _ = writeln!(md, "{}\n", message.content.trim());
    }

    md.push_str("## Conclusion\n\n");
    match state.last_message() {
        Some(last) if last.persona_key == PersonaKey::moderator() => {
            let _ = writeln!(md, "{}", last.content.trim());
        }
        _ => md.push_str("_The debate ended before the moderator's closing statement._\n"),
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vte_domain::{DebateMode, ExpertId, Persona};

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    fn finished_state(topic: &str) -> DebateState {
        let mut state = DebateState::new(topic, ExpertId::numbered(4), DebateMode::Consensus);
        state.record_turn(
            &Persona::new(PersonaKey::optimist(), "Optimist", "s", "i"),
            "Costs are falling.",
        );
        state.record_turn(
            &Persona::new(PersonaKey::moderator(), "Moderator", "s", "i"),
            "Promising but early.",
        );
        state
    }

    #[test]
    fn test_safe_topic() {
        assert_eq!(safe_topic("Ammonia cracking"), "Ammonia_cracking");
        assert_eq!(safe_topic("  solid-state / batteries?! "), "solid_state_batteries");
        assert_eq!(safe_topic("水素 製造"), "水素_製造");
        assert_eq!(safe_topic("???"), "report");
        assert_eq!(safe_topic(&"a".repeat(80)).chars().count(), 50);
    }

    #[test]
    fn test_write_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("reports"));
        let stats = DataStats {
            articles: 3,
            patents: 1,
            news: 0,
            total: 4,
        };

        let paths = writer
            .write(&finished_state("ammonia cracking"), &stats, fixed_time())
            .unwrap();

        assert_eq!(
            paths.markdown.file_name().unwrap(),
            "20260314_092653_ammonia_cracking.md"
        );
        let md = std::fs::read_to_string(&paths.markdown).unwrap();
        assert!(md.contains("# Technology Evaluation: ammonia cracking"));
        assert!(md.contains("| Articles | 3 |"));
        assert!(md.contains("### 2. Moderator"));
        assert!(md.contains("Promising but early."));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.json).unwrap()).unwrap();
        assert_eq!(json["expert_id"], "expert_4");
        assert_eq!(json["mode"], "consensus");
        assert_eq!(json["data_stats"]["total"], 4);
        assert_eq!(json["state"]["turn_count"], 2);
    }

    #[test]
    fn test_interrupted_debate_has_no_conclusion() {
        let mut state = DebateState::new("t", ExpertId::numbered(1), DebateMode::Sequential);
        state.record_turn(
            &Persona::new(PersonaKey::optimist(), "Optimist", "s", "i"),
            "Only one turn.",
        );
        let md = render_markdown(&state, &DataStats::default(), fixed_time());
        assert!(md.contains("ended before the moderator"));
    }
}
