// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;

use crate::application::TeamGenerationService;
use crate::domain::repositories::TeamRepository;

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<TeamGenerationService>,
    pub teams: Arc<dyn TeamRepository>,
    pub generation_timeout: Duration,
}

/// Builds the API router without middleware layers
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/trainings/:id/teams",
            post(handlers::teams::regenerate_teams).get(handlers::teams::get_teams),
        )
        .with_state(state)
}
