use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::team::Team;

/// Repository trait for generated training teams
///
/// Writes only happen through a [`TeamTransaction`] so that replacing the
/// teams of a session is atomic.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Begin a new transaction
    async fn begin(&self) -> Result<Box<dyn TeamTransaction>, String>;

    /// Find all teams of a training session, ordered by team number
    async fn find_by_session(&self, session_id: Uuid) -> Result<Vec<Team>, String>;
}

/// A unit of work over the team store
///
/// Dropping a transaction without calling [`TeamTransaction::commit`] must
/// discard every change made through it.
#[async_trait]
pub trait TeamTransaction: Send {
    /// Take an exclusive lock on the session for the rest of the transaction
    async fn lock_session(&mut self, session_id: Uuid) -> Result<(), String>;

    /// Delete every team of the session, returning how many were removed
    async fn delete_all_for_session(&mut self, session_id: Uuid) -> Result<u64, String>;

    /// Insert the given teams with their members
    async fn create_many(&mut self, teams: &[Team]) -> Result<(), String>;

    /// Make all changes visible
    async fn commit(self: Box<Self>) -> Result<(), String>;

    /// Discard all changes
    async fn rollback(self: Box<Self>) -> Result<(), String>;
}
