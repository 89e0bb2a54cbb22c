use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::team::Team;

/// Response from team regeneration
#[derive(Debug, Serialize)]
pub struct RegenerateTeamsResponse {
    pub training_id: Uuid,
    pub team_ids: Vec<Uuid>,
}

/// A persisted training team
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub training_id: Uuid,
    pub name: String,
    pub member_ids: Vec<Uuid>,
    pub average_level: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            training_id: team.session_id(),
            name: team.name().to_string(),
            member_ids: team.member_ids().to_vec(),
            average_level: team.average_level(),
            created_at: team.created_at(),
        }
    }
}

/// Regenerate the teams of a training session
///
/// POST /api/trainings/:id/teams
pub async fn regenerate_teams(
    State(state): State<AppState>,
    Path(training_id): Path<Uuid>,
) -> Result<(StatusCode, Json<RegenerateTeamsResponse>), ApiError> {
    let team_ids = state
        .generator
        .regenerate_teams_within(training_id, state.generation_timeout)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegenerateTeamsResponse {
            training_id,
            team_ids,
        }),
    ))
}

/// Get the current teams of a training session
///
/// GET /api/trainings/:id/teams
pub async fn get_teams(
    State(state): State<AppState>,
    Path(training_id): Path<Uuid>,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let teams = state
        .teams
        .find_by_session(training_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}
