//! Session provider and the persistence port behind it
//!
//! A [`SessionProvider`] owns one session slot. It starts out unresolved,
//! reads the slot once on [`SessionProvider::init`], and from then on keeps
//! the in-memory session and the persisted slot in step until it is torn
//! down.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::error::{ProviderError, StoreError};
use crate::session::Session;

/// Session as seen by consumers of the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The persisted slot has not been read yet
    Resolving,
    Resolved(Option<Session>),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Resolved(Some(session)) => Some(session),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, SessionState::Resolved(_))
    }
}

/// Persisted key-value slot holding a session
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the session in `slot`, if any
    async fn load(&self, slot: &str) -> Result<Option<Session>, StoreError>;

    async fn save(&self, slot: &str, session: &Session) -> Result<(), StoreError>;

    /// Empty `slot`; removing an empty slot is not an error
    async fn remove(&self, slot: &str) -> Result<(), StoreError>;

    /// Whether the backend is reachable
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// In-process session store keeping JSON-encoded slots
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw data into a slot, bypassing encoding
    pub async fn insert_raw(&self, slot: &str, raw: impl Into<String>) {
        self.slots.lock().await.insert(slot.to_string(), raw.into());
    }

    pub async fn contains(&self, slot: &str) -> bool {
        self.slots.lock().await.contains_key(slot)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, slot: &str) -> Result<Option<Session>, StoreError> {
        let slots = self.slots.lock().await;
        let Some(raw) = slots.get(slot) else {
            return Ok(None);
        };

        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                slot: slot.to_string(),
                reason: e.to_string(),
            })
    }

    async fn save(&self, slot: &str, session: &Session) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(session).map_err(|e| StoreError::Backend(e.to_string()))?;
        self.slots.lock().await.insert(slot.to_string(), raw);
        Ok(())
    }

    async fn remove(&self, slot: &str) -> Result<(), StoreError> {
        self.slots.lock().await.remove(slot);
        Ok(())
    }
}

#[derive(Debug)]
enum Lifecycle {
    Uninitialized,
    Anonymous,
    Authenticated(Session),
    TornDown,
}

impl Lifecycle {
    fn state(&self) -> SessionState {
        match self {
            Lifecycle::Uninitialized => SessionState::Resolving,
            Lifecycle::Anonymous | Lifecycle::TornDown => SessionState::Resolved(None),
            Lifecycle::Authenticated(session) => SessionState::Resolved(Some(session.clone())),
        }
    }
}

/// Owner of the current session for one slot
pub struct SessionProvider {
    store: Arc<dyn SessionStore>,
    slot: String,
    lifecycle: RwLock<Lifecycle>,
}

impl SessionProvider {
    pub fn new(store: Arc<dyn SessionStore>, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
            lifecycle: RwLock::new(Lifecycle::Uninitialized),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Read the persisted slot. Calling this again returns the current state.
    ///
    /// A slot that cannot be decoded is logged, emptied and treated as no
    /// session.
    pub async fn init(&self) -> Result<SessionState, ProviderError> {
        let mut lifecycle = self.lifecycle.write().await;
        match *lifecycle {
            Lifecycle::Uninitialized => {}
            Lifecycle::TornDown => return Err(ProviderError::TornDown),
            _ => return Ok(lifecycle.state()),
        }

        let loaded = match self.store.load(&self.slot).await {
            Ok(session) => session,
            Err(StoreError::Corrupt { slot, reason }) => {
                warn!("Discarding corrupt session slot {}: {}", slot, reason);
                if let Err(e) = self.store.remove(&self.slot).await {
                    warn!("Failed to empty corrupt session slot {}: {}", self.slot, e);
                }
                None
            }
            Err(e) => return Err(e.into()),
        };

        *lifecycle = match loaded {
            Some(session) => Lifecycle::Authenticated(session),
            None => Lifecycle::Anonymous,
        };

        Ok(lifecycle.state())
    }

    pub async fn current_session(&self) -> SessionState {
        self.lifecycle.read().await.state()
    }

    /// Make `session` current and persist it
    pub async fn set_session(&self, session: Session) -> Result<(), ProviderError> {
        let mut lifecycle = self.lifecycle.write().await;
        if matches!(*lifecycle, Lifecycle::TornDown) {
            return Err(ProviderError::TornDown);
        }

        self.store.save(&self.slot, &session).await?;
        info!("Session established for user {}", session.user_id);
        *lifecycle = Lifecycle::Authenticated(session);

        Ok(())
    }

    /// Drop the current session and empty the persisted slot
    pub async fn clear_session(&self) -> Result<(), ProviderError> {
        let mut lifecycle = self.lifecycle.write().await;
        if matches!(*lifecycle, Lifecycle::TornDown) {
            return Err(ProviderError::TornDown);
        }

        self.store.remove(&self.slot).await?;
        info!("Session cleared for slot {}", self.slot);
        *lifecycle = Lifecycle::Anonymous;

        Ok(())
    }

    /// Stop serving the session. The persisted slot is left as it is.
    pub async fn teardown(&self) {
        *self.lifecycle.write().await = Lifecycle::TornDown;
    }
}
