use std::str::FromStr;

/// A single skill rating of a member
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillLevel {
    pub level: f64,
}

/// A raw attribute row of a member, as stored in the attribute catalog
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeValue {
    pub attribute: String,
    pub value: f64,
}

/// Attributes that act as multipliers on the summed skill levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Fitness,
    Leadership,
}

impl AttributeKind {
    /// Every attribute that takes part in leveling
    pub const ALL: [AttributeKind; 2] = [AttributeKind::Fitness, AttributeKind::Leadership];

    /// Coefficient applied when a member has no value for this attribute
    pub fn default_coefficient(self) -> f64 {
        match self {
            AttributeKind::Fitness => 1.0,
            AttributeKind::Leadership => 1.0,
        }
    }

    /// Catalog key of the attribute
    pub fn key(self) -> &'static str {
        match self {
            AttributeKind::Fitness => "FITNESS",
            AttributeKind::Leadership => "LEADERSHIP",
        }
    }

    /// Looks up this attribute's coefficient among raw attribute rows
    ///
    /// The first matching row wins; rows with other names are ignored.
    pub fn coefficient(self, attributes: &[AttributeValue]) -> f64 {
        attributes
            .iter()
            .find(|a| a.attribute.parse::<AttributeKind>() == Ok(self))
            .map(|a| a.value)
            .unwrap_or_else(|| self.default_coefficient())
    }
}

impl FromStr for AttributeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        AttributeKind::ALL
            .into_iter()
            .find(|kind| kind.key() == normalized)
            .ok_or_else(|| format!("Unknown attribute: {}", s))
    }
}

/// Computes the scalar level of a member
///
/// The level is the sum of all skill levels multiplied by the fitness and
/// leadership coefficients. No clamping or rounding happens here.
///
/// # Example
/// ```
/// use training_teams_api::domain::participant::leveling::{
///     compute_level, AttributeValue, SkillLevel,
/// };
///
/// let skills = [SkillLevel { level: 3.0 }, SkillLevel { level: 2.0 }];
/// let attributes = [AttributeValue { attribute: "FITNESS".to_string(), value: 1.2 }];
///
/// assert!((compute_level(&skills, &attributes) - 6.0).abs() < 1e-9);
/// assert_eq!(compute_level(&[], &[]), 0.0);
/// ```
pub fn compute_level(skills: &[SkillLevel], attributes: &[AttributeValue]) -> f64 {
    let skills_sum: f64 = skills.iter().map(|s| s.level).sum();

    AttributeKind::ALL
        .into_iter()
        .fold(skills_sum, |level, kind| level * kind.coefficient(attributes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, value: f64) -> AttributeValue {
        AttributeValue {
            attribute: name.to_string(),
            value,
        }
    }

    #[test]
    fn empty_inputs_yield_zero() {
        assert_eq!(compute_level(&[], &[]), 0.0);
        assert_eq!(compute_level(&[], &[attr("FITNESS", 2.0)]), 0.0);
    }

    #[test]
    fn skills_are_summed_with_default_coefficients() {
        let skills = [SkillLevel { level: 4.0 }, SkillLevel { level: 6.5 }];
        assert_eq!(compute_level(&skills, &[]), 10.5);
    }

    #[test]
    fn fitness_and_leadership_multiply() {
        let skills = [SkillLevel { level: 10.0 }];
        let attributes = [attr("FITNESS", 1.5), attr("LEADERSHIP", 2.0)];

        assert!((compute_level(&skills, &attributes) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn unrelated_attributes_are_ignored() {
        let skills = [SkillLevel { level: 10.0 }];
        let attributes = [attr("SPEED", 5.0), attr("leadership", 0.5)];

        assert!((compute_level(&skills, &attributes) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn first_matching_attribute_wins() {
        let attributes = [attr("FITNESS", 2.0), attr("FITNESS", 3.0)];
        assert_eq!(AttributeKind::Fitness.coefficient(&attributes), 2.0);
    }

    #[test]
    fn level_is_not_clamped() {
        let skills = [SkillLevel { level: -2.0 }];
        assert_eq!(compute_level(&skills, &[attr("FITNESS", 3.0)]), -6.0);
    }

    #[test]
    fn attribute_kind_parse() {
        assert_eq!("fitness".parse::<AttributeKind>(), Ok(AttributeKind::Fitness));
        assert_eq!(" LEADERSHIP".parse::<AttributeKind>(), Ok(AttributeKind::Leadership));
        assert!("STAMINA".parse::<AttributeKind>().is_err());
    }

    #[test]
    fn default_coefficients_are_neutral() {
        for kind in AttributeKind::ALL {
            assert_eq!(kind.default_coefficient(), 1.0);
            assert_eq!(kind.coefficient(&[]), 1.0);
        }
    }
}
