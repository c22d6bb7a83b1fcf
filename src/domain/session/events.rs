//! Registration domain events.
//!
//! Events published after a session change has been saved:
//! - `SessionCreated` - New session created
//! - `AttendeeRegistered` - Attendee placed on the roster
//! - `AttendeeWaitlisted` - Attendee placed on the waitlist
//! - `AttendeeCancelled` - Registered attendee cancelled
//! - `AttendeePromoted` - Waitlisted attendee moved onto the roster

use serde::{Deserialize, Serialize};

use crate::domain::attendee::RegistrationTier;
use crate::domain::foundation::{domain_event, AttendeeId, EventId, SessionId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════
// SessionCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new session is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub name: String,
    pub max_capacity: u32,
    pub created_at: Timestamp,
}

domain_event!(
    SessionCreated,
    event_type = "session.created.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AttendeeRegistered
// ════════════════════════════════════════════════════════════════════════════

/// Published when an attendee takes a roster slot directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeRegistered {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub attendee_id: AttendeeId,
    pub tier: RegistrationTier,
    pub is_vip: bool,
    pub priority_score: u32,
    pub registered_at: Timestamp,
}

domain_event!(
    AttendeeRegistered,
    event_type = "attendee.registered.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = registered_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AttendeeWaitlisted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a full session puts an attendee on the waitlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeWaitlisted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub attendee_id: AttendeeId,
    pub priority_score: u32,

    /// Waitlist length including this attendee.
    pub waitlist_length: usize,
    pub waitlisted_at: Timestamp,
}

domain_event!(
    AttendeeWaitlisted,
    event_type = "attendee.waitlisted.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = waitlisted_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AttendeeCancelled
// ════════════════════════════════════════════════════════════════════════════

/// Published when a registered attendee is cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeCancelled {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub attendee_id: AttendeeId,
    pub cancelled_at: Timestamp,
}

domain_event!(
    AttendeeCancelled,
    event_type = "attendee.cancelled.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = cancelled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AttendeePromoted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a cancellation frees a slot and the waitlist refills it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeePromoted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub attendee_id: AttendeeId,
    pub priority_score: u32,

    /// The cancelled attendee whose slot was taken.
    pub replaced_attendee_id: AttendeeId,
    pub promoted_at: Timestamp,
}

domain_event!(
    AttendeePromoted,
    event_type = "attendee.promoted.v1",
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = promoted_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    fn session_id() -> SessionId {
        SessionId::new("123").unwrap()
    }

    #[test]
    fn session_created_has_versioned_type() {
        let event = SessionCreated {
            event_id: EventId::new(),
            session_id: session_id(),
            name: "Session 1".to_string(),
            max_capacity: 3,
            created_at: Timestamp::now(),
        };

        assert_eq!(event.event_type(), "session.created.v1");
        assert_eq!(event.aggregate_id(), "123");

        let envelope = event.to_envelope().unwrap();
        assert_eq!(envelope.schema_version, 1);
        assert_eq!(envelope.payload["max_capacity"], 3);
    }

    #[test]
    fn promoted_envelope_round_trips_payload() {
        let event = AttendeePromoted {
            event_id: EventId::new(),
            session_id: session_id(),
            attendee_id: AttendeeId::new(),
            priority_score: 240,
            replaced_attendee_id: AttendeeId::new(),
            promoted_at: Timestamp::now(),
        };

        let envelope = event.to_envelope().unwrap();
        let restored: AttendeePromoted = envelope.payload_as().unwrap();

        assert_eq!(envelope.event_type, "attendee.promoted.v1");
        assert_eq!(restored.attendee_id, event.attendee_id);
        assert_eq!(restored.replaced_attendee_id, event.replaced_attendee_id);
    }

    #[test]
    fn attendee_events_use_session_as_aggregate() {
        let attendee_id = AttendeeId::new();
        let now = Timestamp::now();

        let registered = AttendeeRegistered {
            event_id: EventId::new(),
            session_id: session_id(),
            attendee_id,
            tier: RegistrationTier::Gold,
            is_vip: true,
            priority_score: 240,
            registered_at: now,
        };
        let waitlisted = AttendeeWaitlisted {
            event_id: EventId::new(),
            session_id: session_id(),
            attendee_id,
            priority_score: 240,
            waitlist_length: 1,
            waitlisted_at: now,
        };
        let cancelled = AttendeeCancelled {
            event_id: EventId::new(),
            session_id: session_id(),
            attendee_id,
            cancelled_at: now,
        };

        for envelope in [
            registered.to_envelope().unwrap(),
            waitlisted.to_envelope().unwrap(),
            cancelled.to_envelope().unwrap(),
        ] {
            assert_eq!(envelope.aggregate_type, "Session");
            assert_eq!(envelope.aggregate_id, "123");
        }
    }
}
