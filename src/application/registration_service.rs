//! RegistrationService - single entry point over the session handlers.
//!
//! Wires one store, one publisher and one lock registry into every handler,
//! so all commands against a session id share the same lock.

use std::sync::Arc;

use crate::domain::foundation::{AttendeeId, CommandMetadata, SessionId};
use crate::domain::session::{RegistrationError, Session};
use crate::ports::{EventPublisher, SessionStore};

use super::handlers::{
    CancelAttendeeCommand, CancelAttendeeHandler, CancelAttendeeResult, CreateSessionCommand,
    CreateSessionHandler, CreateSessionResult, GetSessionHandler, GetSessionQuery,
    ListSessionsHandler, RegisterAttendeeCommand, RegisterAttendeeHandler, RegisterAttendeeResult,
};
use super::SessionLocks;

/// Registration facade.
pub struct RegistrationService {
    register_handler: RegisterAttendeeHandler,
    cancel_handler: CancelAttendeeHandler,
    get_handler: GetSessionHandler,
    list_handler: ListSessionsHandler,
    create_handler: CreateSessionHandler,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn SessionStore>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        let locks = Arc::new(SessionLocks::new());
        Self {
            register_handler: RegisterAttendeeHandler::new(
                store.clone(),
                event_publisher.clone(),
                locks.clone(),
            ),
            cancel_handler: CancelAttendeeHandler::new(
                store.clone(),
                event_publisher.clone(),
                locks.clone(),
            ),
            get_handler: GetSessionHandler::new(store.clone()),
            list_handler: ListSessionsHandler::new(store.clone()),
            create_handler: CreateSessionHandler::new(store, event_publisher, locks),
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if no session has this id
    pub async fn get_session(&self, session_id: &SessionId) -> Result<Session, RegistrationError> {
        self.get_handler
            .handle(GetSessionQuery {
                session_id: session_id.clone(),
            })
            .await
    }

    pub async fn list_sessions(&self) -> Result<Vec<Session>, RegistrationError> {
        self.list_handler.handle().await
    }

    /// Registers onto the roster, or the waitlist when the session is full.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has this id
    pub async fn register_attendee(
        &self,
        cmd: RegisterAttendeeCommand,
        metadata: CommandMetadata,
    ) -> Result<RegisterAttendeeResult, RegistrationError> {
        self.register_handler.handle(cmd, metadata).await
    }

    /// Cancels a registered attendee. Returns `false` when the session is
    /// missing or the attendee is not on its roster.
    pub async fn cancel_attendee(
        &self,
        session_id: &SessionId,
        attendee_id: &AttendeeId,
        metadata: CommandMetadata,
    ) -> Result<bool, RegistrationError> {
        Ok(self
            .cancel_attendee_detailed(session_id, attendee_id, metadata)
            .await?
            .cancelled)
    }

    /// Like [`RegistrationService::cancel_attendee`], also reporting the promotion.
    pub async fn cancel_attendee_detailed(
        &self,
        session_id: &SessionId,
        attendee_id: &AttendeeId,
        metadata: CommandMetadata,
    ) -> Result<CancelAttendeeResult, RegistrationError> {
        self.cancel_handler
            .handle(
                CancelAttendeeCommand {
                    session_id: session_id.clone(),
                    attendee_id: *attendee_id,
                },
                metadata,
            )
            .await
    }

    /// # Errors
    ///
    /// - `AlreadyExists` if the id is taken
    /// - `ValidationFailed` if the name is empty or too long
    pub async fn create_session(
        &self,
        cmd: CreateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateSessionResult, RegistrationError> {
        self.create_handler.handle(cmd, metadata).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryEventBus, InMemorySessionStore};
    use crate::domain::attendee::AttendeeStatus;

    fn service() -> (RegistrationService, Arc<InMemorySessionStore>) {
        let seed = Session::new(SessionId::new("123").unwrap(), "Session 1", 1).unwrap();
        let store = Arc::new(InMemorySessionStore::with_sessions(vec![seed]));
        let service = RegistrationService::new(store.clone(), Arc::new(InMemoryEventBus::new()));
        (service, store)
    }

    fn register(name: &str, is_vip: bool, tier: &str) -> RegisterAttendeeCommand {
        RegisterAttendeeCommand {
            session_id: SessionId::new("123").unwrap(),
            name: name.to_string(),
            email: format!("{}@example.com", name),
            is_vip,
            tier: tier.to_string(),
        }
    }

    #[tokio::test]
    async fn cancel_is_visible_through_the_store() {
        let (service, store) = service();
        let a = service
            .register_attendee(register("a", false, "Standard"), CommandMetadata::new())
            .await
            .unwrap();
        let b = service
            .register_attendee(register("b", true, "Gold"), CommandMetadata::new())
            .await
            .unwrap();
        assert_eq!(b.status, AttendeeStatus::Waitlisted);

        let id = SessionId::new("123").unwrap();
        assert!(service
            .cancel_attendee(&id, &a.attendee_id, CommandMetadata::new())
            .await
            .unwrap());

        let stored = store.find_by_id(&id).await.unwrap().unwrap();
        let roster: Vec<_> = stored.registered_attendees().ids().copied().collect();
        assert_eq!(roster, vec![b.attendee_id]);
    }

    #[tokio::test]
    async fn cancel_in_unknown_session_is_false() {
        let (service, _) = service();
        let cancelled = service
            .cancel_attendee(
                &SessionId::new("nope").unwrap(),
                &AttendeeId::new(),
                CommandMetadata::new(),
            )
            .await
            .unwrap();
        assert!(!cancelled);
    }

    #[tokio::test]
    async fn concurrent_registrations_never_overbook() {
        let (service, store) = service();
        let service = Arc::new(service);

        let mut tasks = Vec::new();
        for i in 0..10 {
            let service = service.clone();
            tasks.push(tokio::spawn(async move {
                service
                    .register_attendee(register(&format!("p{}", i), false, "Standard"), CommandMetadata::new())
                    .await
                    .unwrap()
            }));
        }
        let mut registered = 0;
        for task in tasks {
            if task.await.unwrap().status == AttendeeStatus::Registered {
                registered += 1;
            }
        }

        assert_eq!(registered, 1);
        let stored = store
            .find_by_id(&SessionId::new("123").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.registered_attendees().len(), 1);
        assert_eq!(stored.waitlisted_attendees().len(), 9);
    }
}
