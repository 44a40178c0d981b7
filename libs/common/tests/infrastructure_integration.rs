//! Integration tests for the infrastructure components
//!
//! These need a running PostgreSQL and Redis (see `DATABASE_URL` and
//! `REDIS_URL`) and are ignored by default. Run them with
//! `cargo test -p common -- --ignored`.

use std::sync::Arc;

use academics::{Principal, Session, SessionProvider, SessionState, SessionStore};
use common::{
    cache::{RedisConfig, RedisPool},
    database::{DatabaseConfig, health_check, init_pool},
    session_store::RedisSessionStore,
};
use sqlx::Row;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_database_reachable() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    let row = sqlx::query("SELECT 1 as result").fetch_one(&pool).await?;
    let result: i32 = row.get("result");
    assert_eq!(result, 1, "PostgreSQL simple query test failed");

    Ok(())
}

#[tokio::test]
#[ignore = "requires Redis"]
async fn test_session_slot_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let redis_pool = RedisPool::new(&RedisConfig::from_env())?;
    assert!(redis_pool.health_check().await?, "Redis health check failed");

    let store = Arc::new(RedisSessionStore::new(redis_pool, 30));
    assert!(store.health_check().await?, "Session store health check failed");
    let slot = format!("integration-{}", Uuid::new_v4());
    let session = Session::new(
        Uuid::new_v4(),
        Principal::Teacher { teacher_id: 11 },
        "integration-token",
        "Integration Teacher",
        "teacher@college.edu",
    );

    let provider = SessionProvider::new(store.clone(), slot.clone());
    assert_eq!(provider.init().await?, SessionState::Resolved(None));
    provider.set_session(session.clone()).await?;

    // A fresh provider on the same slot sees the persisted session.
    let reader = SessionProvider::new(store.clone(), slot.clone());
    assert_eq!(reader.init().await?.session(), Some(&session));

    provider.clear_session().await?;
    assert_eq!(store.load(&slot).await?, None);

    Ok(())
}
