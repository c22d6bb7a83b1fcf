//! Session store port.
//!
//! Keyed storage for Session aggregates. Saving overwrites by id; the last
//! writer wins. Serializing concurrent writers to the same session is the
//! caller's job (see `application::SessionLocks`).

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::Session;
use async_trait::async_trait;

/// Storage port for Session aggregates.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Insert or overwrite a session by id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// All stored sessions. Order is adapter-defined.
    async fn list_all(&self) -> Result<Vec<Session>, DomainError>;

    /// Check if a session exists.
    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
