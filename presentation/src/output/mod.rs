//! Output formatting for research summaries, transcripts and expert tables

pub mod console;
pub mod formatter;
