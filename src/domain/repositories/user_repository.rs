use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::participant::{AttributeValue, Gender, SkillLevel};

/// Member data needed to compute a participant level
#[derive(Debug, Clone, PartialEq)]
pub struct UserLevelingProfile {
    pub id: Uuid,
    pub gender: Option<Gender>,
    pub skills: Vec<SkillLevel>,
    pub attributes: Vec<AttributeValue>,
}

/// Repository trait for member profiles
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Bulk fetch of leveling data
    ///
    /// Returns at most one profile per requested id; ids without a profile
    /// are simply absent from the result.
    async fn find_many_with_skills_and_attributes(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<UserLevelingProfile>, String>;
}
