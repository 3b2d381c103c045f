//! JSONL file writer for research and debate events.
//!
//! Each [`ConversationEvent`] becomes one JSON line: the payload's fields
//! plus `type` and a UTC `timestamp`.

use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use vte_application::{ConversationEvent, ConversationLogger};

/// Writes one JSON object per line. Shared across tasks through a
/// `Mutex<BufWriter<File>>`; flushed after every event and on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Create the file (and parent directories), truncating an existing one.
    ///
    /// Returns `None` with a warning when the file cannot be created; runs
    /// then proceed without a structured log.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create run log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not create run log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Timestamped file name inside `dir`: `<YYYYmmdd_HHMMSS>.run.jsonl`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        Self::new(dir.as_ref().join(format!("{}.run.jsonl", stamp)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Flatten an event into one record. Object payloads are merged at the
/// top level; anything else goes under `data`.
fn to_record(event: ConversationEvent, timestamp: String) -> Value {
    match event.payload {
        Value::Object(mut fields) => {
            fields.insert("type".into(), Value::from(event.event_type));
            fields.insert("timestamp".into(), Value::from(timestamp));
            Value::Object(fields)
        }
        data => json!({
            "type": event.event_type,
            "timestamp": timestamp,
            "data": data,
        }),
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let Ok(line) = serde_json::to_string(&to_record(event, timestamp)) else {
            return;
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Could not write run log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vte_application::ports::conversation_logger::event;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            event::SEARCH_QUERIES,
            serde_json::json!({
                "topic": "ammonia cracking",
                "queries": ["\"ammonia\" AND \"cracking\""]
            }),
        ));
        logger.log(ConversationEvent::new(
            event::DEBATE_TURN,
            serde_json::json!({
                "turn": 1,
                "speaker": "P_OPT",
                "content": "Ammonia is a practical hydrogen carrier."
            }),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.get("type").is_some());
            assert!(record.get("timestamp").is_some());
        }
        assert_eq!(records[0]["type"], "search_queries");
        assert_eq!(records[0]["topic"], "ammonia cracking");
        assert_eq!(records[1]["type"], "debate_turn");
        assert_eq!(records[1]["speaker"], "P_OPT");
        assert_eq!(records[1]["turn"], 1);
    }

    #[test]
    fn test_jsonl_logger_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run2.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            event::DEBATE_COMPLETE,
            serde_json::json!(["a", "b"]),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "debate_complete");
        assert_eq!(records[0]["data"][1], "b");
    }

    #[test]
    fn test_to_record_keeps_payload_fields() {
        let record = to_record(
            ConversationEvent::new(event::FETCH_QUERY, json!({"source": "OpenAlex", "added": 4})),
            "2026-01-01T00:00:00.000Z".to_string(),
        );
        assert_eq!(record["source"], "OpenAlex");
        assert_eq!(record["added"], 4);
        assert_eq!(record["timestamp"], "2026-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_in_dir_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlConversationLogger::in_dir(dir.path().join("logs")).unwrap();
        assert!(logger.path().starts_with(dir.path().join("logs")));
        assert!(logger.path().to_string_lossy().ends_with(".run.jsonl"));
    }
}
