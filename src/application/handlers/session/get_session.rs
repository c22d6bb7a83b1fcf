//! GetSessionHandler - Query handler for retrieving a session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{RegistrationError, Session};
use crate::ports::SessionStore;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for retrieving a session.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<Session, RegistrationError> {
        self.store
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| RegistrationError::not_found(query.session_id))
    }
}
