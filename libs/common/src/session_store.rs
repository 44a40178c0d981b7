//! Redis-backed session slots

use academics::{Session, SessionStore, StoreError};
use async_trait::async_trait;

use crate::cache::RedisPool;

/// Session store keeping each slot under `session:{slot}` with a TTL
#[derive(Clone)]
pub struct RedisSessionStore {
    redis_pool: RedisPool,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(redis_pool: RedisPool, ttl_seconds: u64) -> Self {
        Self {
            redis_pool,
            ttl_seconds,
        }
    }

    pub fn slot_key(slot: &str) -> String {
        format!("session:{}", slot)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, slot: &str) -> Result<Option<Session>, StoreError> {
        let raw = self
            .redis_pool
            .get(&Self::slot_key(slot))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        match raw {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    slot: slot.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    async fn save(&self, slot: &str, session: &Session) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(session).map_err(|e| StoreError::Backend(e.to_string()))?;

        self.redis_pool
            .set(&Self::slot_key(slot), &raw, Some(self.ttl_seconds))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn remove(&self, slot: &str) -> Result<(), StoreError> {
        self.redis_pool
            .delete(&Self::slot_key(slot))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        self.redis_pool
            .health_check()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
