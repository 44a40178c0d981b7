use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod middleware;
mod models;
mod repositories;
mod routes;
mod session;
mod validation;

use common::{
    cache::{RedisConfig, RedisPool},
    database,
    session_store::RedisSessionStore,
    settings::ServiceSettings,
    token::{TokenConfig, TokenService},
};
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::{repositories::UserRepository, session::SessionManager};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repository: UserRepository,
    pub sessions: SessionManager,
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = ServiceSettings::load("AUTH", 3000)?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    info!("Starting authentication service");

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if let Some(dir) = &settings.migrations_dir {
        database::run_migrations(&pool, dir).await?;
    }

    // Session slots live in Redis and expire together with their tokens
    let tokens = TokenService::new(&TokenConfig::from_env()?);
    let redis_pool = RedisPool::new(&RedisConfig::from_env())?;
    let store = RedisSessionStore::new(redis_pool, tokens.expiry_seconds());

    let app_state = AppState {
        db_pool: pool.clone(),
        user_repository: UserRepository::new(pool),
        sessions: SessionManager::new(Arc::new(store), tokens),
    };

    info!("Authentication service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = settings.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Authentication service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
