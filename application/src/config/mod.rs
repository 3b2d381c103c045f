//! Application-level configuration.
//!
//! Plain structs handed to use case constructors:
//!
//! - [`DebateConfig`]: turn budget, answer length, retrieval depth
//! - [`ResearchConfig`]: per-source document limits

pub mod debate_config;
pub mod research_config;

pub use debate_config::DebateConfig;
pub use research_config::ResearchConfig;
