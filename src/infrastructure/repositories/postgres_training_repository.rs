use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::{Registration, RegistrationStatus, TrainingRepository};

/// PostgreSQL implementation of TrainingRepository
///
/// Read-only view over `trainings` and `training_registrations`.
pub struct PostgresTrainingRepository {
    pool: PgPool,
}

impl PostgresTrainingRepository {
    /// Creates a new PostgresTrainingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainingRepository for PostgresTrainingRepository {
    async fn exists(&self, session_id: Uuid) -> Result<bool, String> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM trainings WHERE id = $1)")
            .bind(session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| format!("Failed to find training by id: {}", e))
    }

    async fn find_confirmed(&self, session_id: Uuid) -> Result<Vec<Registration>, String> {
        let user_ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM training_registrations
            WHERE training_id = $1 AND status = $2
            ORDER BY created_at, user_id
            "#,
        )
        .bind(session_id)
        .bind(RegistrationStatus::Confirmed.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find confirmed registrations: {}", e))?;

        Ok(user_ids
            .into_iter()
            .map(|user_id| Registration { user_id })
            .collect())
    }
}
