//! Research domain
//!
//! Value objects for turning a free-text topic into search queries and for
//! normalizing the records returned by external sources.

pub mod document;
pub mod keyword;
pub mod parsing;
pub mod query;
pub mod topic;
