//! Session aggregate entity.
//!
//! A session is a capacity-bounded event. It owns a registered roster and a
//! waitlist, and is the only place attendee statuses change.
//!
//! # Concurrency
//!
//! The aggregate does no locking. Callers must serialize mutating operations
//! per session id; `application::SessionLocks` does this for the service.

use serde::{Deserialize, Serialize};

use super::{AttendeeList, CapacityWarningLevel};
use crate::domain::attendee::{Attendee, AttendeeStatus};
use crate::domain::foundation::{AttendeeId, DomainError, ErrorCode, SessionId, Timestamp};

/// Maximum length for session name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Outcome of cancelling a registered attendee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancellation {
    /// The attendee that was cancelled, already removed from the roster.
    pub cancelled: Attendee,
    /// The waitlisted attendee promoted into the freed slot, if any.
    pub promoted: Option<Attendee>,
}

/// Session aggregate.
///
/// # Invariants
///
/// - `registered.len() <= max_capacity`
/// - an attendee id appears in at most one of `registered` / `waitlisted`
/// - `id`, `name` and `max_capacity` never change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct Session {
    id: SessionId,
    name: String,
    max_capacity: u32,
    registered: AttendeeList,
    waitlisted: AttendeeList,
    created_at: Timestamp,
}

impl Session {
    /// Create an empty session.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if name is empty or too long
    pub fn new(id: SessionId, name: impl Into<String>, max_capacity: u32) -> Result<Self, DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;

        Ok(Self {
            id,
            name,
            max_capacity,
            registered: AttendeeList::new(),
            waitlisted: AttendeeList::new(),
            created_at: Timestamp::now(),
        })
    }

    /// Rebuild a session from persisted parts, checking the aggregate invariants.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is invalid or a listed attendee's
    ///   status does not match its list
    /// - `CapacityExceeded` if the roster is larger than `max_capacity`
    /// - `AlreadyExists` if an attendee is on both lists
    pub fn reconstitute(
        id: SessionId,
        name: String,
        max_capacity: u32,
        registered: AttendeeList,
        waitlisted: AttendeeList,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;

        if registered.len() > max_capacity as usize {
            return Err(DomainError::new(
                ErrorCode::CapacityExceeded,
                format!(
                    "Session {} has {} registered attendees but capacity {}",
                    id,
                    registered.len(),
                    max_capacity
                ),
            ));
        }
        if let Some(both) = registered.ids().find(|a| waitlisted.contains(a)) {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("Attendee {} is both registered and waitlisted", both),
            ));
        }
        Self::ensure_statuses(&registered, AttendeeStatus::Registered, "registered")?;
        Self::ensure_statuses(&waitlisted, AttendeeStatus::Waitlisted, "waitlisted")?;

        Ok(Self {
            id,
            name,
            max_capacity,
            registered,
            waitlisted,
            created_at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// Registered roster, in registration order.
    pub fn registered_attendees(&self) -> &AttendeeList {
        &self.registered
    }

    /// Waitlist, in insertion order.
    pub fn waitlisted_attendees(&self) -> &AttendeeList {
        &self.waitlisted
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Looks an attendee up in either list.
    pub fn find_attendee(&self, id: &AttendeeId) -> Option<&Attendee> {
        self.registered.get(id).or_else(|| self.waitlisted.get(id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// True while the roster has a free slot.
    pub fn is_capacity_available(&self) -> bool {
        self.registered.len() < self.max_capacity as usize
    }

    /// Remaining free slots on the roster.
    pub fn available_slots(&self) -> u32 {
        let taken = u32::try_from(self.registered.len()).unwrap_or(u32::MAX);
        self.max_capacity.saturating_sub(taken)
    }

    /// Occupancy bucket of the roster.
    pub fn capacity_warning_level(&self) -> CapacityWarningLevel {
        CapacityWarningLevel::from_occupancy(self.registered.len(), self.max_capacity)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register an attendee onto the roster.
    ///
    /// Callers are expected to check `is_capacity_available` first; a full
    /// session is an error here, not a fallback to the waitlist. An attendee
    /// already on this session's waitlist is moved onto the roster.
    ///
    /// # Errors
    ///
    /// - `CapacityExceeded` if the roster is full
    /// - `AlreadyExists` if the attendee is already registered
    /// - `InvalidStateTransition` if the attendee cannot be registered
    pub fn register_attendee(&mut self, mut attendee: Attendee) -> Result<(), DomainError> {
        if !self.is_capacity_available() {
            return Err(DomainError::new(
                ErrorCode::CapacityExceeded,
                "No capacity available",
            )
            .with_detail("session_id", self.id.to_string())
            .with_detail("max_capacity", self.max_capacity.to_string()));
        }
        let id = *attendee.id();
        if self.registered.contains(&id) {
            return Err(self.already_member(&id));
        }
        // A waitlisted attendee moves over with its stored state.
        if self.waitlisted.contains(&id) {
            self.move_to_roster(&id)?;
            return Ok(());
        }

        attendee.mark_registered(Timestamp::now())?;
        self.registered.push(attendee)
    }

    /// Append an attendee to the waitlist, regardless of capacity.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the attendee is already in this session
    /// - `InvalidStateTransition` if the attendee cannot be waitlisted
    pub fn add_to_waitlist(&mut self, mut attendee: Attendee) -> Result<(), DomainError> {
        self.ensure_not_member(attendee.id())?;

        attendee.mark_waitlisted(Timestamp::now())?;
        self.waitlisted.push(attendee)
    }

    /// Cancel a registered attendee and refill the slot from the waitlist.
    ///
    /// Returns `false` without touching anything when the id is not on the
    /// roster, which includes waitlisted and unknown ids.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if a transition is refused
    pub fn cancel_attendee(&mut self, attendee_id: &AttendeeId) -> Result<bool, DomainError> {
        Ok(self.cancel_registered(attendee_id)?.is_some())
    }

    /// Same as [`Session::cancel_attendee`], reporting who moved.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if a transition is refused
    pub fn cancel_registered(
        &mut self,
        attendee_id: &AttendeeId,
    ) -> Result<Option<Cancellation>, DomainError> {
        let Some(attendee) = self.registered.get_mut(attendee_id) else {
            return Ok(None);
        };
        attendee.mark_cancelled()?;

        let Some(cancelled) = self.registered.remove(attendee_id) else {
            return Ok(None);
        };
        let promoted = self.promote_from_waitlist()?;

        Ok(Some(Cancellation {
            cancelled,
            promoted,
        }))
    }

    /// Move the highest-priority waitlisted attendee onto the roster.
    ///
    /// No-op when the waitlist is empty or the roster is full. Ties on
    /// priority score go to the earliest waitlisted attendee.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the selected attendee cannot be registered
    pub fn promote_from_waitlist(&mut self) -> Result<Option<Attendee>, DomainError> {
        if self.waitlisted.is_empty() || !self.is_capacity_available() {
            return Ok(None);
        }
        let Some(selected) = self.waitlisted.highest_priority() else {
            return Ok(None);
        };

        self.move_to_roster(&selected)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Marks a waitlisted attendee registered and moves it to the roster end.
    fn move_to_roster(&mut self, id: &AttendeeId) -> Result<Option<Attendee>, DomainError> {
        if let Some(attendee) = self.waitlisted.get_mut(id) {
            attendee.mark_registered(Timestamp::now())?;
        }
        let Some(moved) = self.waitlisted.remove(id) else {
            return Ok(None);
        };
        self.registered.push(moved.clone())?;

        Ok(Some(moved))
    }

    fn ensure_not_member(&self, id: &AttendeeId) -> Result<(), DomainError> {
        if self.registered.contains(id) || self.waitlisted.contains(id) {
            return Err(self.already_member(id));
        }
        Ok(())
    }

    fn already_member(&self, id: &AttendeeId) -> DomainError {
        DomainError::new(
            ErrorCode::AlreadyExists,
            format!("Attendee {} is already in session {}", id, self.id),
        )
    }

    fn ensure_statuses(
        list: &AttendeeList,
        expected: AttendeeStatus,
        field: &str,
    ) -> Result<(), DomainError> {
        match list.iter().find(|a| a.status() != expected) {
            Some(attendee) => Err(DomainError::validation(
                field,
                format!(
                    "Attendee {} is {} but listed as {}",
                    attendee.id(),
                    attendee.status(),
                    expected
                ),
            )),
            None => Ok(()),
        }
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name", "Name cannot be empty"));
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Name must be {} characters or less", MAX_NAME_LENGTH),
            ));
        }
        Ok(())
    }
}

/// Persisted shape of a [`Session`], checked on the way in.
#[derive(Deserialize)]
struct SessionRecord {
    id: SessionId,
    name: String,
    max_capacity: u32,
    registered: AttendeeList,
    waitlisted: AttendeeList,
    created_at: Timestamp,
}

impl TryFrom<SessionRecord> for Session {
    type Error = DomainError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        Session::reconstitute(
            record.id,
            record.name,
            record.max_capacity,
            record.registered,
            record.waitlisted,
            record.created_at,
        )
    }
}
