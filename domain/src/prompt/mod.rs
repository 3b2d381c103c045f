//! Prompt domain
//!
//! Templates for the LLM-backed research helpers and for debate turns.

mod template;

pub use template::PromptTemplate;
