// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod postgres_team_repository;
pub mod postgres_training_repository;
pub mod postgres_user_repository;

pub use in_memory::InMemoryClubStore;
pub use postgres_team_repository::PostgresTeamRepository;
pub use postgres_training_repository::PostgresTrainingRepository;
pub use postgres_user_repository::PostgresUserRepository;
