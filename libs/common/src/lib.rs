//! Shared infrastructure for the examination cell services
//!
//! This crate provides what both HTTP services need besides the academic
//! rules themselves: database pooling, the Redis-backed session slots,
//! bearer tokens, and per-service settings.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, init_pool, health_check};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     let is_healthy = health_check(&pool).await?;
//!     println!("Database health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod database;
pub mod error;
pub mod session_store;
pub mod settings;
pub mod token;

use academics::{ProviderError, Session, SessionProvider, SessionStore};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::token::TokenService;

/// Session provider for the slot belonging to `user_id`
pub fn provider_for_user(store: Arc<dyn SessionStore>, user_id: Uuid) -> SessionProvider {
    SessionProvider::new(store, user_id.to_string())
}

/// Resolve the session a bearer token stands for.
///
/// The token must validate and must still be the one held by the user's
/// session slot; a logout or a newer login invalidates older tokens.
pub async fn resolve_session(
    tokens: &TokenService,
    store: Arc<dyn SessionStore>,
    token: &str,
) -> Result<Option<Session>, ProviderError> {
    let claims = match tokens.validate(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Rejected bearer token: {}", e);
            return Ok(None);
        }
    };

    let provider = provider_for_user(store, claims.sub);
    let state = provider.init().await?;

    Ok(state
        .session()
        .filter(|session| session.holds_token(token) && session.role() == claims.role)
        .cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenConfig;
    use academics::{MemorySessionStore, Principal, Role};

    fn tokens() -> TokenService {
        TokenService::new(&TokenConfig {
            secret: "an-exam-cell-test-secret-of-32-bytes!".to_string(),
            expiry_seconds: 3600,
        })
    }

    #[tokio::test]
    async fn test_resolves_current_token_only() {
        let tokens = tokens();
        let store = Arc::new(MemorySessionStore::new());
        let user_id = Uuid::new_v4();

        let old_token = tokens.issue(user_id, Role::Student).unwrap();
        let token = format!("{old_token}-current");
        let session = Session::new(
            user_id,
            Principal::Student { student_id: 3 },
            token.clone(),
            "Asha Rao",
            "asha@college.edu",
        );
        provider_for_user(store.clone(), user_id)
            .set_session(session.clone())
            .await
            .unwrap();

        // Signature is valid but the slot now holds another token.
        assert_eq!(
            resolve_session(&tokens, store.clone(), &old_token).await.unwrap(),
            None
        );

        let current = tokens.issue(user_id, Role::Student).unwrap();
        let session = Session {
            token: current.clone(),
            ..session
        };
        provider_for_user(store.clone(), user_id)
            .set_session(session.clone())
            .await
            .unwrap();
        assert_eq!(
            resolve_session(&tokens, store.clone(), &current).await.unwrap(),
            Some(session)
        );
    }

    #[tokio::test]
    async fn test_invalid_token_is_anonymous() {
        let store = Arc::new(MemorySessionStore::new());
        assert_eq!(
            resolve_session(&tokens(), store, "not-a-jwt").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_role_must_match_claims() {
        let tokens = tokens();
        let store = Arc::new(MemorySessionStore::new());
        let user_id = Uuid::new_v4();

        let token = tokens.issue(user_id, Role::Admin).unwrap();
        let session = Session::new(
            user_id,
            Principal::Teacher { teacher_id: 9 },
            token.clone(),
            "Dr. Iyer",
            "iyer@college.edu",
        );
        provider_for_user(store.clone(), user_id)
            .set_session(session)
            .await
            .unwrap();

        assert_eq!(resolve_session(&tokens, store, &token).await.unwrap(), None);
    }
}
