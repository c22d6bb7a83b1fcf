//! ListSessionsHandler - Query handler for listing every session.

use std::sync::Arc;

use crate::domain::session::{RegistrationError, Session};
use crate::ports::SessionStore;

/// Handler for listing sessions. Order follows the store.
pub struct ListSessionsHandler {
    store: Arc<dyn SessionStore>,
}

impl ListSessionsHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<Vec<Session>, RegistrationError> {
        Ok(self.store.list_all().await?)
    }
}
