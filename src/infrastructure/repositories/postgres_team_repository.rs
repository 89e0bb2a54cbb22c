use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::repositories::{TeamRepository, TeamTransaction};
use crate::domain::team::Team;

/// PostgreSQL implementation of TeamRepository
///
/// Teams live in `training_teams`, their members in `training_team_members`
/// (cascading on team deletion).
#[derive(Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn begin(&self) -> Result<Box<dyn TeamTransaction>, String> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| format!("Failed to begin transaction: {}", e))?;

        Ok(Box::new(PostgresTeamTransaction { tx }))
    }

    async fn find_by_session(&self, session_id: Uuid) -> Result<Vec<Team>, String> {
        let rows: Vec<(Uuid, i32, String, Decimal, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, number, name, average_level, created_at
            FROM training_teams
            WHERE training_id = $1
            ORDER BY number
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find teams by session: {}", e))?;

        let members: Vec<(Uuid, Uuid)> = sqlx::query_as(
            r#"
            SELECT m.team_id, m.user_id
            FROM training_team_members m
            JOIN training_teams t ON t.id = m.team_id
            WHERE t.training_id = $1
            ORDER BY m.team_id, m.position
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find team members by session: {}", e))?;

        let mut members_by_team: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for (team_id, user_id) in members {
            members_by_team.entry(team_id).or_default().push(user_id);
        }

        rows.into_iter()
            .map(|(id, number, name, average_level, created_at)| {
                let number = u32::try_from(number)
                    .map_err(|_| format!("Invalid team number from database: {}", number))?;
                Ok(Team::from_persistence(
                    id,
                    session_id,
                    number,
                    name,
                    members_by_team.remove(&id).unwrap_or_default(),
                    average_level,
                    created_at,
                ))
            })
            .collect()
    }
}

/// Transaction-scoped team writes
///
/// Dropping the inner `sqlx::Transaction` without commit rolls it back.
pub struct PostgresTeamTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl TeamTransaction for PostgresTeamTransaction {
    async fn lock_session(&mut self, session_id: Uuid) -> Result<(), String> {
        sqlx::query("SELECT id FROM trainings WHERE id = $1 FOR UPDATE")
            .bind(session_id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| format!("Failed to lock training session: {}", e))?;

        Ok(())
    }

    async fn delete_all_for_session(&mut self, session_id: Uuid) -> Result<u64, String> {
        let result = sqlx::query("DELETE FROM training_teams WHERE training_id = $1")
            .bind(session_id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| format!("Failed to delete teams: {}", e))?;

        Ok(result.rows_affected())
    }

    async fn create_many(&mut self, teams: &[Team]) -> Result<(), String> {
        for team in teams {
            let number = i32::try_from(team.number())
                .map_err(|_| format!("Team number out of range: {}", team.number()))?;

            sqlx::query(
                r#"
                INSERT INTO training_teams (
                    id, training_id, number, name, average_level, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(team.id())
            .bind(team.session_id())
            .bind(number)
            .bind(team.name())
            .bind(team.average_level())
            .bind(team.created_at())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| format!("Failed to insert team: {}", e))?;

            for (position, user_id) in (0i32..).zip(team.member_ids()) {
                sqlx::query(
                    r#"
                    INSERT INTO training_team_members (team_id, user_id, position)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(team.id())
                .bind(*user_id)
                .bind(position)
                .execute(&mut *self.tx)
                .await
                .map_err(|e| format!("Failed to insert team member: {}", e))?;
            }
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), String> {
        self.tx
            .commit()
            .await
            .map_err(|e| format!("Failed to commit transaction: {}", e))
    }

    async fn rollback(self: Box<Self>) -> Result<(), String> {
        self.tx
            .rollback()
            .await
            .map_err(|e| format!("Failed to roll back transaction: {}", e))
    }
}
