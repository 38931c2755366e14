//! Session Store Port - Per-conversation state persistence.
//!
//! The platform scopes storage to one conversation; the engine treats it
//! as a key/value mapping that lives exactly as long as the session. A
//! session is written only when a turn commits and removed when the user
//! declines to continue.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionState;

/// Port for per-conversation session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads a session's state, if the session was launched.
    async fn load(&self, id: &SessionId) -> Result<Option<SessionState>, StoreError>;

    /// Persists a session's state.
    async fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), StoreError>;

    /// Discards a session's state at session end.
    async fn remove(&self, id: &SessionId) -> Result<(), StoreError>;
}

/// Session storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The storage backend failed.
    #[error("session storage failed: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
