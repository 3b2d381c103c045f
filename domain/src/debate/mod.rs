//! Debate domain
//!
//! Personas take turns on a shared [`state::DebateState`]. Which persona
//! speaks next, and when the debate ends, is decided by a
//! [`graph::DebateGraph`] built for one [`mode::DebateMode`].

pub mod graph;
pub mod mode;
pub mod persona;
pub mod state;
