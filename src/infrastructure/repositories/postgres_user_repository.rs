use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::participant::{AttributeValue, Gender, SkillLevel};
use crate::domain::repositories::{UserLevelingProfile, UserRepository};

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_many_with_skills_and_attributes(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<UserLevelingProfile>, String> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let users: Vec<(Uuid, Option<String>)> = sqlx::query_as(
            r#"
            SELECT id, gender
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find users by ids: {}", e))?;

        let skills: Vec<(Uuid, f64)> = sqlx::query_as(
            r#"
            SELECT user_id, level
            FROM user_skills
            WHERE user_id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find user skills: {}", e))?;

        let attributes: Vec<(Uuid, String, f64)> = sqlx::query_as(
            r#"
            SELECT user_id, attribute, value
            FROM user_attributes
            WHERE user_id = ANY($1)
            ORDER BY user_id, id
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find user attributes: {}", e))?;

        let mut skills_by_user: HashMap<Uuid, Vec<SkillLevel>> = HashMap::new();
        for (user_id, level) in skills {
            skills_by_user
                .entry(user_id)
                .or_default()
                .push(SkillLevel { level });
        }

        let mut attributes_by_user: HashMap<Uuid, Vec<AttributeValue>> = HashMap::new();
        for (user_id, attribute, value) in attributes {
            attributes_by_user
                .entry(user_id)
                .or_default()
                .push(AttributeValue { attribute, value });
        }

        Ok(users
            .into_iter()
            .map(|(id, gender)| UserLevelingProfile {
                id,
                gender: Gender::from_raw(gender.as_deref()),
                skills: skills_by_user.remove(&id).unwrap_or_default(),
                attributes: attributes_by_user.remove(&id).unwrap_or_default(),
            })
            .collect())
    }
}
