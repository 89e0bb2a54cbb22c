use async_trait::async_trait;
use uuid::Uuid;

/// Registration state of a member for a training session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Confirmed,
    Waitlisted,
    Cancelled,
}

impl RegistrationStatus {
    /// Value stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Waitlisted => "waitlisted",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

/// A confirmed registration of a member to a training session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub user_id: Uuid,
}

/// Read access to training sessions and their registrations
#[async_trait]
pub trait TrainingRepository: Send + Sync {
    /// Check whether a training session exists
    async fn exists(&self, session_id: Uuid) -> Result<bool, String>;

    /// Find confirmed registrations of a session in registration order
    ///
    /// Waitlisted and cancelled registrations are never returned.
    async fn find_confirmed(&self, session_id: Uuid) -> Result<Vec<Registration>, String>;
}
