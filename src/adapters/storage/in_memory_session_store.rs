//! In-Memory Session Store Adapter
//!
//! Keeps sessions in a process-local map. Nothing survives a restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::Session;
use crate::ports::SessionStore;

/// In-memory storage for sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store pre-populated with sessions. Later duplicates win.
    pub fn with_sessions(sessions: impl IntoIterator<Item = Session>) -> Self {
        let map = sessions
            .into_iter()
            .map(|session| (session.id().clone(), session))
            .collect();
        Self {
            sessions: Arc::new(RwLock::new(map)),
        }
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Get the number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id().clone(), session.clone());
        Ok(())
    }

    /// Sessions ordered by id.
    async fn list_all(&self) -> Result<Vec<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        let mut all: Vec<Session> = sessions.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(all)
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.sessions.read().await.contains_key(id))
    }
}
