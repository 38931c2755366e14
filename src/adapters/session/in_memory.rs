//! In-Memory Session Store - HashMap-backed session persistence.
//!
//! Sessions live for one conversation, so process memory is the natural
//! backing for local deployments and tests. The platform's own session
//! storage replaces this behind the same port in hosted deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionState;
use crate::ports::{SessionStore, StoreError};

/// Session store backed by a process-local map.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, SessionState>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Returns true if no sessions are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionState>, StoreError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| StoreError::backend("session map lock poisoned"))?;
        Ok(sessions.get(id).cloned())
    }

    async fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), StoreError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| StoreError::backend("session map lock poisoned"))?;
        sessions.insert(*id, state.clone());
        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| StoreError::backend("session map lock poisoned"))?;
        sessions.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_of_unknown_session_returns_none() {
        let store = InMemorySessionStore::new();
        assert!(store.load(&SessionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        let mut state = SessionState::new();
        state.faculty = Some("Engineering".to_string());

        store.save(&id, &state).await.unwrap();
        let loaded = store.load(&id).await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn remove_discards_the_session() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        store.save(&id, &SessionState::new()).await.unwrap();
        assert_eq!(store.len(), 1);

        store.remove(&id).await.unwrap();
        assert!(store.is_empty());
        assert!(store.load(&id).await.unwrap().is_none());
    }
}
