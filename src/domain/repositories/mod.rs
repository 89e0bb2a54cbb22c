// Repository interfaces (ports)
// Implemented by adapters in the infrastructure layer

pub mod team_repository;
pub mod training_repository;
pub mod user_repository;

pub use team_repository::{TeamRepository, TeamTransaction};
pub use training_repository::{Registration, RegistrationStatus, TrainingRepository};
pub use user_repository::{UserLevelingProfile, UserRepository};
