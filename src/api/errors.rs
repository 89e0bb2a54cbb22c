use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::team::TeamGenerationError;

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 422 Unprocessable Entity error
    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Creates a 504 Gateway Timeout error
    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<TeamGenerationError> for ApiError {
    fn from(error: TeamGenerationError) -> Self {
        let message = error.to_string();
        match error {
            TeamGenerationError::SessionNotFound(_) => Self::not_found(message),
            TeamGenerationError::InsufficientParticipants { .. } => {
                Self::unprocessable_entity(message)
            }
            TeamGenerationError::DeadlineExceeded(_) => Self::gateway_timeout(message),
            TeamGenerationError::UnrepresentableLevel(_)
            | TeamGenerationError::Lookup(_)
            | TeamGenerationError::Persistence(_) => {
                tracing::error!(error = %message, "Team generation failed");
                Self::internal_server_error(message)
            }
        }
    }
}
