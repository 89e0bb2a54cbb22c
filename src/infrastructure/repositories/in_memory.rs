//! In-memory club store
//!
//! Implements every repository port over shared maps. Transactions stage
//! their writes and only apply them on commit, so dropping one is a
//! rollback. Useful for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use crate::domain::repositories::{
    Registration, RegistrationStatus, TeamRepository, TeamTransaction, TrainingRepository,
    UserLevelingProfile, UserRepository,
};
use crate::domain::team::Team;

type SessionLocks = Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>;

/// In-memory implementation of the training, user and team repositories
#[derive(Debug, Clone, Default)]
pub struct InMemoryClubStore {
    trainings: Arc<RwLock<HashMap<Uuid, Vec<(Uuid, RegistrationStatus)>>>>,
    users: Arc<RwLock<HashMap<Uuid, UserLevelingProfile>>>,
    teams: Arc<RwLock<HashMap<Uuid, Vec<Team>>>>,
    session_locks: SessionLocks,
    fail_inserts: Arc<AtomicBool>,
}

impl InMemoryClubStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a training session without registrations
    pub async fn add_training(&self, session_id: Uuid) {
        self.trainings.write().await.entry(session_id).or_default();
    }

    /// Register a member for a session; unknown sessions are created
    pub async fn register(&self, session_id: Uuid, user_id: Uuid, status: RegistrationStatus) {
        self.trainings
            .write()
            .await
            .entry(session_id)
            .or_default()
            .push((user_id, status));
    }

    /// Add or replace a member profile
    pub async fn add_user(&self, profile: UserLevelingProfile) {
        self.users.write().await.insert(profile.id, profile);
    }

    /// Make every subsequent `create_many` fail until switched off
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Committed teams of a session
    pub async fn teams_for(&self, session_id: Uuid) -> Vec<Team> {
        self.teams
            .read()
            .await
            .get(&session_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl TrainingRepository for InMemoryClubStore {
    async fn exists(&self, session_id: Uuid) -> Result<bool, String> {
        Ok(self.trainings.read().await.contains_key(&session_id))
    }

    async fn find_confirmed(&self, session_id: Uuid) -> Result<Vec<Registration>, String> {
        let trainings = self.trainings.read().await;
        Ok(trainings
            .get(&session_id)
            .map(|registrations| {
                registrations
                    .iter()
                    .filter(|(_, status)| *status == RegistrationStatus::Confirmed)
                    .map(|(user_id, _)| Registration { user_id: *user_id })
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl UserRepository for InMemoryClubStore {
    async fn find_many_with_skills_and_attributes(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<UserLevelingProfile>, String> {
        let users = self.users.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl TeamRepository for InMemoryClubStore {
    async fn begin(&self) -> Result<Box<dyn TeamTransaction>, String> {
        Ok(Box::new(InMemoryTeamTransaction {
            teams: self.teams.clone(),
            session_locks: self.session_locks.clone(),
            fail_inserts: self.fail_inserts.clone(),
            cleared: Vec::new(),
            inserted: Vec::new(),
            guards: Vec::new(),
        }))
    }

    async fn find_by_session(&self, session_id: Uuid) -> Result<Vec<Team>, String> {
        let mut teams = self.teams_for(session_id).await;
        teams.sort_by_key(Team::number);
        Ok(teams)
    }
}

/// Staged writes of one in-memory transaction
struct InMemoryTeamTransaction {
    teams: Arc<RwLock<HashMap<Uuid, Vec<Team>>>>,
    session_locks: SessionLocks,
    fail_inserts: Arc<AtomicBool>,
    cleared: Vec<Uuid>,
    inserted: Vec<Team>,
    guards: Vec<OwnedMutexGuard<()>>,
}

#[async_trait]
impl TeamTransaction for InMemoryTeamTransaction {
    async fn lock_session(&mut self, session_id: Uuid) -> Result<(), String> {
        let lock = {
            let mut locks = self
                .session_locks
                .lock()
                .map_err(|e| format!("Failed to lock session {}: {}", session_id, e))?;
            locks.entry(session_id).or_default().clone()
        };

        self.guards.push(lock.lock_owned().await);
        Ok(())
    }

    async fn delete_all_for_session(&mut self, session_id: Uuid) -> Result<u64, String> {
        let staged_before = self.inserted.len();
        self.inserted.retain(|team| team.session_id() != session_id);
        let mut removed = (staged_before - self.inserted.len()) as u64;

        if !self.cleared.contains(&session_id) {
            removed += self
                .teams
                .read()
                .await
                .get(&session_id)
                .map_or(0, |teams| teams.len() as u64);
            self.cleared.push(session_id);
        }

        Ok(removed)
    }

    async fn create_many(&mut self, teams: &[Team]) -> Result<(), String> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err("Failed to insert teams: insert rejected by store".to_string());
        }

        self.inserted.extend_from_slice(teams);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), String> {
        let this = *self;
        let mut store = this.teams.write().await;
        for session_id in &this.cleared {
            store.remove(session_id);
        }
        for team in this.inserted {
            store.entry(team.session_id()).or_default().push(team);
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), String> {
        Ok(())
    }
}
