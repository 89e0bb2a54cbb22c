// Application layer
// Use cases orchestrating domain logic over repository ports

pub mod regenerate_teams;

pub use regenerate_teams::TeamGenerationService;
