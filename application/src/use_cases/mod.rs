//! Use cases (application services)

pub mod adaptive_fetch;
pub mod extract_keywords;
pub mod knowledge_partition;
pub mod research_topic;
pub mod retrieve_context;
pub mod run_debate;
pub mod synthesize_queries;

#[cfg(test)]
pub(crate) mod test_support;
