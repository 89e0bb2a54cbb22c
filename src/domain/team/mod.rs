// Team domain module
// Contains the training team entity, the size policy and the generator

#![allow(clippy::module_inception)]

pub mod errors;
pub mod generator;
pub mod team;
pub mod value_objects;

// Re-export main types for convenience
pub use errors::{TeamGenerationError, TeamGenerationResult};
pub use generator::generate_teams;
pub use team::Team;
pub use value_objects::TeamSizePolicy;
