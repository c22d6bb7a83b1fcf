//! RegisterAttendeeHandler - Command handler for registering an attendee.
//!
//! Places a new attendee on the roster while there is room, otherwise on the
//! waitlist. The capacity check and the write happen under the session lock.

use std::sync::Arc;

use crate::application::SessionLocks;
use crate::domain::attendee::{Attendee, AttendeeStatus};
use crate::domain::foundation::{
    AttendeeId, CommandMetadata, EventEnvelope, EventId, SerializableDomainEvent, SessionId,
};
use crate::domain::session::{
    AttendeeRegistered, AttendeeWaitlisted, CapacityWarningLevel, RegistrationError, Session,
};
use crate::ports::{EventPublisher, SessionStore};

/// Command to register an attendee into a session.
#[derive(Debug, Clone)]
pub struct RegisterAttendeeCommand {
    pub session_id: SessionId,
    pub name: String,
    pub email: String,
    pub is_vip: bool,
    /// Raw tier input; unrecognised values register as Standard.
    pub tier: String,
}

/// Result of a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAttendeeResult {
    pub attendee_id: AttendeeId,
    /// `Registered` or `Waitlisted`.
    pub status: AttendeeStatus,
    pub warning_level: CapacityWarningLevel,
}

/// Handler for attendee registration.
pub struct RegisterAttendeeHandler {
    store: Arc<dyn SessionStore>,
    event_publisher: Arc<dyn EventPublisher>,
    locks: Arc<SessionLocks>,
}

impl RegisterAttendeeHandler {
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
        cmd: RegisterAttendeeCommand,
        metadata: CommandMetadata,
    ) -> Result<RegisterAttendeeResult, RegistrationError> {
        let _guard = self.locks.acquire(&cmd.session_id).await;

        // 1. Load session
        let mut session = self
            .store
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| RegistrationError::not_found(cmd.session_id.clone()))?;

        // 2. Build attendee with a fresh id
        let attendee = Attendee::new(AttendeeId::new(), cmd.name, cmd.email, cmd.is_vip, &cmd.tier);
        let attendee_id = *attendee.id();

        // 3. Roster if there is room, waitlist otherwise
        let placed = if session.is_capacity_available() {
            session.register_attendee(attendee)
        } else {
            session.add_to_waitlist(attendee)
        };
        placed.map_err(|e| {
            let err = RegistrationError::from(e);
            if matches!(err, RegistrationError::InvalidState(_)) {
                tracing::error!(
                    session_id = %cmd.session_id,
                    attendee_id = %attendee_id,
                    "Registration hit an invalid attendee transition: {}", err
                );
            }
            err
        })?;

        // 4. Persist
        self.store.save(&session).await?;

        let placed = session
            .find_attendee(&attendee_id)
            .cloned()
            .ok_or_else(|| RegistrationError::infrastructure("Registered attendee not found in session"))?;
        let warning_level = session.capacity_warning_level();

        tracing::info!(
            session_id = %cmd.session_id,
            attendee_id = %attendee_id,
            status = %placed.status(),
            priority_score = placed.priority_score(),
            "Attendee registration processed"
        );
        log_warning_level(&session, warning_level);

        // 5. Publish
        let envelope = registration_event(&session, &placed)?
            .with_correlation_id(metadata.correlation_id());
        self.event_publisher.publish(envelope).await?;

        Ok(RegisterAttendeeResult {
            attendee_id,
            status: placed.status(),
            warning_level,
        })
    }
}

fn log_warning_level(session: &Session, level: CapacityWarningLevel) {
    let registered = session.registered_attendees().len();
    match level {
        CapacityWarningLevel::NearlyFull => tracing::warn!(
            session_id = %session.id(),
            warning_level = %level,
            registered,
            max_capacity = session.max_capacity(),
            "Session is nearly full"
        ),
        CapacityWarningLevel::HalfFull => tracing::info!(
            session_id = %session.id(),
            warning_level = %level,
            registered,
            max_capacity = session.max_capacity(),
            "Session is half full"
        ),
        CapacityWarningLevel::None => {}
    }
}

fn registration_event(
    session: &Session,
    attendee: &Attendee,
) -> Result<EventEnvelope, RegistrationError> {
    let at = attendee.registration_date().copied().unwrap_or_default();
    let envelope = match attendee.status() {
        AttendeeStatus::Waitlisted => AttendeeWaitlisted {
            event_id: EventId::new(),
            session_id: session.id().clone(),
            attendee_id: *attendee.id(),
            priority_score: attendee.priority_score(),
            waitlist_length: session.waitlisted_attendees().len(),
            waitlisted_at: at,
        }
        .to_envelope()?,
        _ => AttendeeRegistered {
            event_id: EventId::new(),
            session_id: session.id().clone(),
            attendee_id: *attendee.id(),
            tier: attendee.tier(),
            is_vip: attendee.is_vip(),
            priority_score: attendee.priority_score(),
            registered_at: at,
        }
        .to_envelope()?,
    };
    Ok(envelope)
}
