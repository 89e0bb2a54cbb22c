//! Regeneration of the teams of a training session.
//!
//! Loads confirmed participants, levels them, partitions them and replaces
//! the persisted teams of the session inside a single transaction.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::participant::Participant;
use crate::domain::repositories::{
    Registration, TeamRepository, TeamTransaction, TrainingRepository, UserLevelingProfile,
    UserRepository,
};
use crate::domain::team::{
    generate_teams, Team, TeamGenerationError, TeamGenerationResult, TeamSizePolicy,
};

/// Service that regenerates training teams
pub struct TeamGenerationService {
    trainings: Arc<dyn TrainingRepository>,
    users: Arc<dyn UserRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl TeamGenerationService {
    pub fn new(
        trainings: Arc<dyn TrainingRepository>,
        users: Arc<dyn UserRepository>,
        teams: Arc<dyn TeamRepository>,
    ) -> Self {
        Self {
            trainings,
            users,
            teams,
        }
    }

    /// Replaces the teams of a session with a freshly generated set
    ///
    /// # Returns
    /// * `Ok(Vec<Uuid>)` - Ids of the new teams in generation order
    /// * `Err(TeamGenerationError)` - Nothing was changed
    #[tracing::instrument(skip(self))]
    pub async fn regenerate_teams(&self, session_id: Uuid) -> TeamGenerationResult<Vec<Uuid>> {
        // 1. The session must exist
        let exists = self
            .trainings
            .exists(session_id)
            .await
            .map_err(TeamGenerationError::Lookup)?;
        if !exists {
            return Err(TeamGenerationError::SessionNotFound(session_id));
        }

        // 2. Confirmed registrations only
        let registrations = self
            .trainings
            .find_confirmed(session_id)
            .await
            .map_err(TeamGenerationError::Lookup)?;
        if registrations.is_empty() {
            return Err(TeamGenerationError::InsufficientParticipants {
                count: 0,
                minimum: TeamSizePolicy::MIN,
            });
        }

        // 3-4. Leveling inputs in bulk, then participants
        let participants = self.load_participants(&registrations).await?;

        // 5. Partitioning
        let teams = generate_teams(session_id, &participants)?;

        // 6. Atomic replace
        let removed = self.replace_teams(session_id, &teams).await?;

        tracing::info!(
            participants = participants.len(),
            teams = teams.len(),
            replaced = removed,
            "Regenerated training teams"
        );

        Ok(teams.iter().map(Team::id).collect())
    }

    /// Same as [`Self::regenerate_teams`], bounded by `deadline`
    ///
    /// When the deadline elapses the in-flight transaction is dropped
    /// uncommitted, so previously persisted teams stay untouched.
    pub async fn regenerate_teams_within(
        &self,
        session_id: Uuid,
        deadline: Duration,
    ) -> TeamGenerationResult<Vec<Uuid>> {
        match tokio::time::timeout(deadline, self.regenerate_teams(session_id)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(session_id = %session_id, ?deadline, "Team generation timed out");
                Err(TeamGenerationError::DeadlineExceeded(deadline))
            }
        }
    }

    async fn load_participants(
        &self,
        registrations: &[Registration],
    ) -> TeamGenerationResult<Vec<Participant>> {
        let mut seen = HashSet::new();
        let user_ids: Vec<Uuid> = registrations
            .iter()
            .map(|r| r.user_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let profiles: HashMap<Uuid, UserLevelingProfile> = self
            .users
            .find_many_with_skills_and_attributes(&user_ids)
            .await
            .map_err(TeamGenerationError::Lookup)?
            .into_iter()
            .map(|profile| (profile.id, profile))
            .collect();

        if profiles.len() < user_ids.len() {
            tracing::debug!(
                missing = user_ids.len() - profiles.len(),
                "Participants without profile get default level"
            );
        }

        Ok(user_ids
            .into_iter()
            .map(|id| match profiles.get(&id) {
                Some(profile) => Participant::from_profile(
                    id,
                    profile.gender,
                    &profile.skills,
                    &profile.attributes,
                ),
                None => Participant::from_profile(id, None, &[], &[]),
            })
            .collect())
    }

    /// Runs delete-then-insert in one transaction, rolling back on any error
    async fn replace_teams(&self, session_id: Uuid, teams: &[Team]) -> TeamGenerationResult<u64> {
        let mut tx = self
            .teams
            .begin()
            .await
            .map_err(TeamGenerationError::Persistence)?;

        let written = write_teams(tx.as_mut(), session_id, teams).await;
        match written {
            Ok(removed) => {
                tx.commit().await.map_err(TeamGenerationError::Persistence)?;
                Ok(removed)
            }
            Err(e) => {
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::error!(error = %rollback_error, "Failed to roll back team replacement");
                }
                Err(TeamGenerationError::Persistence(e))
            }
        }
    }
}

async fn write_teams(
    tx: &mut dyn TeamTransaction,
    session_id: Uuid,
    teams: &[Team],
) -> Result<u64, String> {
    tx.lock_session(session_id).await?;
    let removed = tx.delete_all_for_session(session_id).await?;
    tx.create_many(teams).await?;
    Ok(removed)
}
