use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use training_teams_api::api::{self, AppState};
use training_teams_api::application::TeamGenerationService;
use training_teams_api::config::AppConfig;
use training_teams_api::infrastructure::repositories::{
    PostgresTeamRepository, PostgresTrainingRepository, PostgresUserRepository,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected successfully");

    let teams = Arc::new(PostgresTeamRepository::new(pool.clone()));
    let generator = TeamGenerationService::new(
        Arc::new(PostgresTrainingRepository::new(pool.clone())),
        Arc::new(PostgresUserRepository::new(pool)),
        teams.clone(),
    );

    let state = AppState {
        generator: Arc::new(generator),
        teams,
        generation_timeout: config.generation_timeout,
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
