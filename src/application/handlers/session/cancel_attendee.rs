//! CancelAttendeeHandler - Command handler for cancelling a registration.

use std::sync::Arc;

use crate::application::SessionLocks;
use crate::domain::foundation::{
    AttendeeId, CommandMetadata, EventEnvelope, EventId, SerializableDomainEvent, SessionId,
    Timestamp,
};
use crate::domain::session::{AttendeeCancelled, AttendeePromoted, Cancellation, RegistrationError};
use crate::ports::{EventPublisher, SessionStore};

/// Command to cancel a registered attendee.
#[derive(Debug, Clone)]
pub struct CancelAttendeeCommand {
    pub session_id: SessionId,
    pub attendee_id: AttendeeId,
}

/// Result of a cancellation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CancelAttendeeResult {
    /// False when the session is missing or the attendee is not on its roster.
    pub cancelled: bool,
    /// Waitlisted attendee moved into the freed slot.
    pub promoted: Option<AttendeeId>,
}

/// Handler for cancellations.
///
/// A successful cancellation (and any promotion it triggers) is saved before
/// events are published. Nothing is saved when no attendee was cancelled.
pub struct CancelAttendeeHandler {
    store: Arc<dyn SessionStore>,
    event_publisher: Arc<dyn EventPublisher>,
    locks: Arc<SessionLocks>,
}

impl CancelAttendeeHandler {
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
        cmd: CancelAttendeeCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelAttendeeResult, RegistrationError> {
        let _guard = self.locks.acquire(&cmd.session_id).await;

        let Some(mut session) = self.store.find_by_id(&cmd.session_id).await? else {
            tracing::debug!(session_id = %cmd.session_id, "Cancel for unknown session");
            return Ok(CancelAttendeeResult::default());
        };

        let outcome = session.cancel_registered(&cmd.attendee_id).map_err(|e| {
            let err = RegistrationError::from(e);
            tracing::error!(
                session_id = %cmd.session_id,
                attendee_id = %cmd.attendee_id,
                "Cancellation hit an invalid attendee transition: {}", err
            );
            err
        })?;

        let Some(Cancellation { cancelled, promoted }) = outcome else {
            tracing::debug!(
                session_id = %cmd.session_id,
                attendee_id = %cmd.attendee_id,
                "Attendee is not registered; nothing cancelled"
            );
            return Ok(CancelAttendeeResult::default());
        };

        self.store.save(&session).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            attendee_id = %cancelled.id(),
            promoted = ?promoted.as_ref().map(|a| a.id().to_string()),
            "Attendee cancelled"
        );

        let correlation_id = metadata.correlation_id();
        let now = Timestamp::now();
        let mut events: Vec<EventEnvelope> = vec![AttendeeCancelled {
            event_id: EventId::new(),
            session_id: cmd.session_id.clone(),
            attendee_id: *cancelled.id(),
            cancelled_at: now,
        }
        .to_envelope()?
        .with_correlation_id(correlation_id.clone())];

        if let Some(promoted) = &promoted {
            events.push(
                AttendeePromoted {
                    event_id: EventId::new(),
                    session_id: cmd.session_id.clone(),
                    attendee_id: *promoted.id(),
                    priority_score: promoted.priority_score(),
                    replaced_attendee_id: *cancelled.id(),
                    promoted_at: promoted.registration_date().copied().unwrap_or(now),
                }
                .to_envelope()?
                .with_correlation_id(correlation_id),
            );
        }
        self.event_publisher.publish_all(events).await?;

        Ok(CancelAttendeeResult {
            cancelled: true,
            promoted: promoted.map(|a| *a.id()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{session_with_capacity, MockEventPublisher, MockSessionStore};
    use super::*;
    use crate::domain::attendee::{Attendee, AttendeeStatus};
    use crate::domain::session::Session;

    fn attendee(name: &str, is_vip: bool, tier: &str) -> Attendee {
        Attendee::new(AttendeeId::new(), name, "x@example.com", is_vip, tier)
    }

    /// Capacity-1 session with A registered and a Gold VIP B waitlisted.
    fn full_session() -> (Session, AttendeeId, AttendeeId) {
        let mut session = session_with_capacity(1);
        let a = attendee("A", false, "Standard");
        let b = attendee("B", true, "Gold");
        let (a_id, b_id) = (*a.id(), *b.id());
        session.register_attendee(a).unwrap();
        session.add_to_waitlist(b).unwrap();
        (session, a_id, b_id)
    }

    fn handler(
        store: Arc<MockSessionStore>,
        publisher: Arc<MockEventPublisher>,
    ) -> CancelAttendeeHandler {
        CancelAttendeeHandler::new(store, publisher, Arc::new(SessionLocks::new()))
    }

    fn command(attendee_id: AttendeeId) -> CancelAttendeeCommand {
        CancelAttendeeCommand {
            session_id: SessionId::new("123").unwrap(),
            attendee_id,
        }
    }

    #[tokio::test]
    async fn cancels_and_promotes_and_persists() {
        let (session, a_id, b_id) = full_session();
        let store = Arc::new(MockSessionStore::with_session(session));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler(store.clone(), publisher.clone());

        let result = handler
            .handle(command(a_id), CommandMetadata::new())
            .await
            .unwrap();

        assert!(result.cancelled);
        assert_eq!(result.promoted, Some(b_id));

        let saved = store.saved_sessions();
        assert_eq!(saved.len(), 1);
        let roster: Vec<_> = saved[0].registered_attendees().ids().copied().collect();
        assert_eq!(roster, vec![b_id]);
        assert!(saved[0].waitlisted_attendees().is_empty());
        assert_eq!(
            saved[0].find_attendee(&b_id).unwrap().status(),
            AttendeeStatus::Registered
        );

        assert_eq!(
            publisher.event_types(),
            vec!["attendee.cancelled.v1", "attendee.promoted.v1"]
        );
    }

    #[tokio::test]
    async fn missing_session_returns_false() {
        let store = Arc::new(MockSessionStore::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler(store.clone(), publisher.clone());

        let result = handler
            .handle(command(AttendeeId::new()), CommandMetadata::new())
            .await
            .unwrap();

        assert!(!result.cancelled);
        assert!(store.saved_sessions().is_empty());
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn waitlisted_attendee_is_not_cancelled() {
        let (session, _, b_id) = full_session();
        let store = Arc::new(MockSessionStore::with_session(session));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler(store.clone(), publisher.clone());

        let result = handler
            .handle(command(b_id), CommandMetadata::new())
            .await
            .unwrap();

        assert_eq!(result, CancelAttendeeResult::default());
        assert!(store.saved_sessions().is_empty());
        assert!(publisher.published_events().is_empty());
    }

    #[tokio::test]
    async fn cancel_without_waitlist_publishes_only_cancellation() {
        let mut session = session_with_capacity(2);
        let a = attendee("A", false, "Premium");
        let a_id = *a.id();
        session.register_attendee(a).unwrap();
        let store = Arc::new(MockSessionStore::with_session(session));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler(store, publisher.clone());

        let result = handler
            .handle(command(a_id), CommandMetadata::new())
            .await
            .unwrap();

        assert!(result.cancelled);
        assert!(result.promoted.is_none());
        assert_eq!(publisher.event_types(), vec!["attendee.cancelled.v1"]);
    }

    #[tokio::test]
    async fn second_cancel_returns_false() {
        let (session, a_id, _) = full_session();
        let store = Arc::new(MockSessionStore::with_session(session));
        let handler = handler(store, Arc::new(MockEventPublisher::new()));

        assert!(handler.handle(command(a_id), CommandMetadata::new()).await.unwrap().cancelled);
        assert!(!handler.handle(command(a_id), CommandMetadata::new()).await.unwrap().cancelled);
    }

    #[tokio::test]
    async fn save_failure_is_infrastructure_error() {
        let (session, a_id, _) = full_session();
        let store = Arc::new(MockSessionStore::failing_with(session));
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = handler(store, publisher.clone());

        let result = handler.handle(command(a_id), CommandMetadata::new()).await;

        assert!(matches!(result, Err(RegistrationError::Infrastructure(_))));
        assert!(publisher.published_events().is_empty());
    }
}
