//! CreateSessionHandler - Command handler for creating new sessions.

use std::sync::Arc;

use crate::application::SessionLocks;
use crate::domain::foundation::{CommandMetadata, EventId, SerializableDomainEvent, SessionId};
use crate::domain::session::{RegistrationError, Session, SessionCreated};
use crate::ports::{EventPublisher, SessionStore};

/// Command to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub session_id: SessionId,
    pub name: String,
    pub max_capacity: u32,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: Session,
    pub event: SessionCreated,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    store: Arc<dyn SessionStore>,
    event_publisher: Arc<dyn EventPublisher>,
    locks: Arc<SessionLocks>,
}

impl CreateSessionHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        event_publisher: Arc<dyn EventPublisher>,
        locks: Arc<SessionLocks>,
    ) -> Self {
        Self {
            store,
            event_publisher,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateSessionResult, RegistrationError> {
        let _guard = self.locks.acquire(&cmd.session_id).await;

        // 1. Reject taken ids
        if self.store.exists(&cmd.session_id).await? {
            return Err(RegistrationError::already_exists(cmd.session_id));
        }

        // 2. Create session aggregate
        let session = Session::new(cmd.session_id, cmd.name, cmd.max_capacity)?;

        // 3. Persist session
        self.store.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            max_capacity = session.max_capacity(),
            "Session created"
        );

        // 4. Create and publish event
        let event = SessionCreated {
            event_id: EventId::new(),
            session_id: session.id().clone(),
            name: session.name().to_string(),
            max_capacity: session.max_capacity(),
            created_at: *session.created_at(),
        };

        let envelope = event
            .to_envelope()?
            .with_correlation_id(metadata.correlation_id());

        self.event_publisher.publish(envelope).await?;

        Ok(CreateSessionResult { session, event })
    }
}
