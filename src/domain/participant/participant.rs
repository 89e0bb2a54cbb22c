use uuid::Uuid;

use super::leveling::{compute_level, AttributeValue, SkillLevel};
use super::value_objects::Gender;

/// A confirmed registrant ready to be placed into a team
///
/// # Invariants
/// - Immutable after construction
/// - `level` is whatever leveling produced; it is never rounded here
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    id: Uuid,
    gender: Option<Gender>,
    level: f64,
}

impl Participant {
    /// Creates a participant with an already computed level
    pub fn new(id: Uuid, gender: Option<Gender>, level: f64) -> Self {
        Self { id, gender, level }
    }

    /// Creates a participant from raw profile data, computing its level
    ///
    /// # Example
    /// ```
    /// use training_teams_api::domain::participant::leveling::SkillLevel;
    /// use training_teams_api::domain::participant::Participant;
    /// use uuid::Uuid;
    ///
    /// let p = Participant::from_profile(Uuid::new_v4(), None, &[SkillLevel { level: 7.0 }], &[]);
    /// assert_eq!(p.level(), 7.0);
    /// ```
    pub fn from_profile(
        id: Uuid,
        gender: Option<Gender>,
        skills: &[SkillLevel],
        attributes: &[AttributeValue],
    ) -> Self {
        Self::new(id, gender, compute_level(skills, attributes))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn level(&self) -> f64 {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_getters() {
        let id = Uuid::new_v4();
        let p = Participant::new(id, Some(Gender::Female), 42.5);

        assert_eq!(p.id(), id);
        assert_eq!(p.gender(), Some(Gender::Female));
        assert_eq!(p.level(), 42.5);
    }

    #[test]
    fn from_profile_applies_leveling() {
        let skills = [SkillLevel { level: 5.0 }, SkillLevel { level: 5.0 }];
        let attributes = [AttributeValue {
            attribute: "LEADERSHIP".to_string(),
            value: 1.1,
        }];

        let p = Participant::from_profile(Uuid::new_v4(), Some(Gender::Male), &skills, &attributes);

        assert!((p.level() - 11.0).abs() < 1e-9);
        assert_eq!(p.gender(), Some(Gender::Male));
    }

    #[test]
    fn missing_profile_defaults_to_zero_level() {
        let p = Participant::from_profile(Uuid::new_v4(), None, &[], &[]);

        assert_eq!(p.level(), 0.0);
        assert_eq!(p.gender(), None);
    }
}
