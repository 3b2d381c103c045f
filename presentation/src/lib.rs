//! Presentation layer for vte
//!
//! This crate contains CLI definitions, console formatters,
//! progress reporters and the Markdown/JSON report writer.

pub mod cli;
pub mod output;
pub mod progress;
pub mod report;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use report::{DataStats, ReportError, ReportPaths, ReportWriter, safe_topic};
