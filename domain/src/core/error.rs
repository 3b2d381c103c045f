//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Invalid expert id: {0}")]
    InvalidExpertId(String),

    #[error("Unknown debate mode: {0}")]
    UnknownMode(String),

    #[error("Unknown persona: {0}")]
    UnknownPersona(String),
}
