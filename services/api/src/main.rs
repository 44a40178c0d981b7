use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;

use academics::GradeAggregator;
use common::{
    cache::{RedisConfig, RedisPool},
    database::{self, DatabaseConfig, init_pool},
    session_store::RedisSessionStore,
    settings::ServiceSettings,
    token::{TokenConfig, TokenService},
};
use tokio::net::TcpListener;

use crate::{repositories::ResultRepository, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = ServiceSettings::load("API", 3001)?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    info!("Starting API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if let Some(dir) = &settings.migrations_dir {
        database::run_migrations(&pool, dir).await?;
    }

    let tokens = TokenService::new(&TokenConfig::from_env()?);
    let redis_pool = RedisPool::new(&RedisConfig::from_env())?;
    let session_store = RedisSessionStore::new(redis_pool, tokens.expiry_seconds());

    let app_state = AppState {
        db_pool: pool.clone(),
        results: Arc::new(ResultRepository::new(pool)),
        session_store: Arc::new(session_store),
        tokens,
        aggregator: GradeAggregator::default(),
    };

    info!("API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = settings.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("API service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
