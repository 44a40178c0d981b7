//! Session management on top of the shared session slots

use academics::{Session, SessionStore};
use anyhow::Result;
use common::token::TokenService;
use std::sync::Arc;
use tracing::{error, info};

use crate::models::User;

/// Session manager for issuing, resolving and ending user sessions
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    tokens: TokenService,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(store: Arc<dyn SessionStore>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    /// Issue a token for `user` and make it the user's current session.
    ///
    /// Any session the user held before is replaced, so its token stops
    /// resolving.
    pub async fn establish(&self, user: &User) -> Result<Session> {
        info!("Creating session for user: {}", user.id);

        let principal = user.principal()?;
        let token = self.tokens.issue(user.id, principal.role())?;
        let session = Session::new(
            user.id,
            principal,
            token,
            user.full_name.clone(),
            user.email.clone(),
        );

        let provider = common::provider_for_user(self.store.clone(), user.id);
        provider.init().await?;
        provider.set_session(session.clone()).await?;

        Ok(session)
    }

    /// Session the bearer token currently stands for
    pub async fn resolve(&self, token: &str) -> Result<Option<Session>> {
        Ok(common::resolve_session(&self.tokens, self.store.clone(), token).await?)
    }

    /// Whether the session store answers
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await.unwrap_or_else(|e| {
            error!("Session store health check failed: {}", e);
            false
        })
    }

    /// End the session held by `token`. Ending an unknown or stale token is a
    /// no-op, so a newer login elsewhere is not cut short.
    pub async fn end(&self, token: &str) -> Result<bool> {
        let Some(session) = self.resolve(token).await? else {
            return Ok(false);
        };

        info!("Deleting session for user: {}", session.user_id);
        let provider = common::provider_for_user(self.store.clone(), session.user_id);
        provider.init().await?;
        provider.clear_session().await?;

        Ok(true)
    }
}
