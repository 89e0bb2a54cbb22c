use super::errors::{TeamGenerationError, TeamGenerationResult};
use super::value_objects::TeamSizePolicy;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

/// A generated team of a training session
///
/// Teams have no identity continuity: every regeneration mints new ids and
/// replaces the previous set for the session.
///
/// # Invariants
/// - `name` is "Team {number}" where `number` is the 1-based generation order
/// - `average_level` is the member level mean rounded to 2 decimal places
///
/// # Example
/// ```
/// use training_teams_api::domain::team::Team;
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let members = vec![Uuid::new_v4(), Uuid::new_v4()];
/// let team = Team::new(Uuid::new_v4(), 1, members.clone(), &[10.0, 5.0], Utc::now()).unwrap();
///
/// assert_eq!(team.name(), "Team 1");
/// assert_eq!(team.member_ids(), members.as_slice());
/// assert_eq!(team.average_level(), Decimal::new(750, 2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    id: Uuid,
    session_id: Uuid,
    number: u32,
    name: String,
    member_ids: Vec<Uuid>,
    average_level: Decimal,
    created_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new team with a freshly minted id
    ///
    /// # Arguments
    /// * `session_id` - The training session the team belongs to
    /// * `number` - 1-based position in the generation pass
    /// * `member_ids` - Participants in assignment order
    /// * `member_levels` - Levels of the same participants, used for the average
    /// * `created_at` - Timestamp of the generation pass
    ///
    /// # Errors
    /// `UnrepresentableLevel` when the member level mean has no decimal form.
    pub fn new(
        session_id: Uuid,
        number: u32,
        member_ids: Vec<Uuid>,
        member_levels: &[f64],
        created_at: DateTime<Utc>,
    ) -> TeamGenerationResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            session_id,
            number,
            name: Self::name_for(number),
            member_ids,
            average_level: Self::average_of(member_levels)?,
            created_at,
        })
    }

    /// Display name for the team at `number`
    pub fn name_for(number: u32) -> String {
        format!("Team {}", number)
    }

    /// Mean of `levels` rounded to 2 decimal places, 0 for no levels
    ///
    /// Fails when the mean is NaN, infinite or beyond the `Decimal` range.
    pub fn average_of(levels: &[f64]) -> TeamGenerationResult<Decimal> {
        if TeamSizePolicy::is_empty(levels.len()) {
            return Ok(Decimal::ZERO);
        }

        let mean = levels.iter().sum::<f64>() / levels.len() as f64;
        let average = Decimal::from_f64_retain(mean)
            .ok_or(TeamGenerationError::UnrepresentableLevel(mean))?;

        Ok(average.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member_ids(&self) -> &[Uuid] {
        &self.member_ids
    }

    pub fn size(&self) -> usize {
        self.member_ids.len()
    }

    pub fn average_level(&self) -> Decimal {
        self.average_level
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true when the team is inside the nominal size range
    pub fn has_valid_size(&self) -> bool {
        TeamSizePolicy::is_valid(self.size())
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: Uuid,
        session_id: Uuid,
        number: u32,
        name: String,
        member_ids: Vec<Uuid>,
        average_level: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            number,
            name,
            member_ids,
            average_level,
            created_at,
        }
    }
}
