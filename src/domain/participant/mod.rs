// Participant domain module
// Leveling of raw member profiles and the participant value object

#![allow(clippy::module_inception)]

pub mod leveling;
pub mod participant;
pub mod value_objects;

pub use leveling::{compute_level, AttributeKind, AttributeValue, SkillLevel};
pub use participant::Participant;
pub use value_objects::Gender;
