use std::str::FromStr;

/// Gender recorded on a member profile
///
/// Profiles without a recognised gender are represented as `None` at the
/// call sites rather than with a dedicated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parses an optional raw value coming from storage
    ///
    /// Unknown or missing values yield `None`.
    ///
    /// # Example
    /// ```
    /// use training_teams_api::domain::participant::value_objects::Gender;
    ///
    /// assert_eq!(Gender::from_raw(Some("female")), Some(Gender::Female));
    /// assert_eq!(Gender::from_raw(Some("other")), None);
    /// assert_eq!(Gender::from_raw(None), None);
    /// ```
    pub fn from_raw(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|value| value.parse().ok())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            other => Err(format!("Unknown gender: {}", other)),
        }
    }
}
