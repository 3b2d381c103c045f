//! Knowledge partition domain
//!
//! Documents for one topic are stored as entries tagged with an
//! [`expert::ExpertId`]. The partition is created on first write, queried
//! many times and deleted as a whole.

pub mod entry;
pub mod expert;
