use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quillpost_api::config::{build_log_filter, Config, StorageBackend};
use quillpost_api::repositories::Stores;
use quillpost_api::services::Argon2Hasher;
use quillpost_api::{build_router, AppState};
use quillpost_shared_config::log_level_from_env;

/// Open the configured storage backend, running migrations for PostgreSQL
async fn open_stores(config: &Config) -> anyhow::Result<Stores> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let database = config.database();
            tracing::info!("Connecting to database...");

            let pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .acquire_timeout(Duration::from_secs(database.connect_timeout_secs))
                .connect(&database.url)
                .await
                .context("Failed to connect to PostgreSQL")?;

            tracing::info!("Database connection established");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations completed successfully");

            Ok(Stores::postgres(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; all data is lost on restart");
            Ok(Stores::in_memory())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(build_log_filter(&log_level_from_env()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        environment = %config.environment(),
        storage = %config.storage_backend,
        "Starting quillpost API server on port {}",
        config.port
    );

    let stores = open_stores(&config).await?;
    let state = AppState::from_config(&config, stores, Arc::new(Argon2Hasher::default()));
    tracing::info!(page_size = config.posts_page_size, "GraphQL schema built");

    let app = build_router(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    if !config.is_production() {
        tracing::info!(
            "GraphQL Playground available at http://{}:{}/graphql/playground",
            addr.ip(),
            addr.port()
        );
    }

    axum::serve(listener, app).await?;

    Ok(())
}
