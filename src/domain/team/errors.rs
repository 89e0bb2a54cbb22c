use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while generating and persisting training teams
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamGenerationError {
    #[error("Training session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Not enough participants: {count} confirmed, at least {minimum} required")]
    InsufficientParticipants { count: usize, minimum: usize },

    #[error("Team average level cannot be represented: {0}")]
    UnrepresentableLevel(f64),

    #[error("Failed to load generation inputs: {0}")]
    Lookup(String),

    #[error("Failed to persist teams: {0}")]
    Persistence(String),

    #[error("Team generation exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),
}

pub type TeamGenerationResult<T> = Result<T, TeamGenerationError>;
