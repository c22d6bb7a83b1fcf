//! Attendee entity.
//!
//! An attendee is created once per registration command and is then owned by
//! the session it was placed into. Status changes go through the session.

use serde::{Deserialize, Serialize};

use super::{AttendeeStatus, RegistrationTier};
use crate::domain::foundation::{AttendeeId, DomainError, ErrorCode, StateMachine, Timestamp};

/// Multiplier applied to a VIP attendee's tier weight.
pub const VIP_SCORE_FACTOR: f64 = 0.8;

/// A participant in a session.
///
/// # Invariants
///
/// - `id`, `name`, `email`, `is_vip` and `tier` never change after creation
/// - `priority_score` is computed once at creation and never recomputed
/// - Once `Cancelled`, no further status transition is permitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    id: AttendeeId,
    name: String,
    email: String,
    is_vip: bool,
    tier: RegistrationTier,
    priority_score: u32,
    status: AttendeeStatus,

    /// Set when the attendee is registered or waitlisted.
    registration_date: Option<Timestamp>,
}

impl Attendee {
    /// Create a pending attendee from raw tier input.
    ///
    /// Unrecognised tier input silently falls back to `Standard`.
    pub fn new(
        id: AttendeeId,
        name: impl Into<String>,
        email: impl Into<String>,
        is_vip: bool,
        tier_input: &str,
    ) -> Self {
        Self::with_tier(id, name, email, is_vip, RegistrationTier::parse_lenient(tier_input))
    }

    /// Create a pending attendee with an already-parsed tier.
    pub fn with_tier(
        id: AttendeeId,
        name: impl Into<String>,
        email: impl Into<String>,
        is_vip: bool,
        tier: RegistrationTier,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            is_vip,
            tier,
            priority_score: Self::calculate_priority_score(tier, is_vip),
            status: AttendeeStatus::Pending,
            registration_date: None,
        }
    }

    /// Reconstitute an attendee from persistence (no recomputation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AttendeeId,
        name: String,
        email: String,
        is_vip: bool,
        tier: RegistrationTier,
        priority_score: u32,
        status: AttendeeStatus,
        registration_date: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            is_vip,
            tier,
            priority_score,
            status,
            registration_date,
        }
    }

    /// `round(tier.weight() * (0.8 if VIP else 1.0))`.
    pub fn calculate_priority_score(tier: RegistrationTier, is_vip: bool) -> u32 {
        let factor = if is_vip { VIP_SCORE_FACTOR } else { 1.0 };
        (f64::from(tier.weight()) * factor).round() as u32
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &AttendeeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_vip(&self) -> bool {
        self.is_vip
    }

    pub fn tier(&self) -> RegistrationTier {
        self.tier
    }

    pub fn priority_score(&self) -> u32 {
        self.priority_score
    }

    pub fn status(&self) -> AttendeeStatus {
        self.status
    }

    pub fn registration_date(&self) -> Option<&Timestamp> {
        self.registration_date.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions (driven by the owning session)
    // ─────────────────────────────────────────────────────────────────────────

    /// Mark the attendee as registered.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already registered or cancelled
    pub(crate) fn mark_registered(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.transition(AttendeeStatus::Registered, "Cannot register attendee")?;
        self.registration_date = Some(at);
        Ok(())
    }

    /// Mark the attendee as waitlisted.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already waitlisted or cancelled
    pub(crate) fn mark_waitlisted(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.transition(AttendeeStatus::Waitlisted, "Cannot waitlist attendee")?;
        self.registration_date = Some(at);
        Ok(())
    }

    /// Mark the attendee as cancelled. Terminal.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already cancelled
    pub(crate) fn mark_cancelled(&mut self) -> Result<(), DomainError> {
        self.transition(AttendeeStatus::Cancelled, "Attendee is already cancelled")
    }

    fn transition(&mut self, target: AttendeeStatus, message: &str) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("{}: status is {}", message, self.status),
            )
            .with_detail("attendee_id", self.id.to_string())
            .with_detail("from", self.status.to_string())
            .with_detail("to", target.to_string()));
        }
        self.status = target;
        Ok(())
    }
}
