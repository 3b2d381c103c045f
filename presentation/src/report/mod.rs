//! Markdown and JSON reports written after each debate

pub mod stats;
pub mod writer;

pub use stats::DataStats;
pub use writer::{ReportError, ReportPaths, ReportWriter, safe_topic};
