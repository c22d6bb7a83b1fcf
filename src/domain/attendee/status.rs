//! AttendeeStatus enum tracking an attendee through registration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Registration status of an attendee within a session.
///
/// ```text
/// Pending ──► Registered ◄──► Waitlisted
///    │            │               │
///    └────────────┴──► Cancelled ◄┘   (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttendeeStatus {
    #[default]
    Pending,
    Registered,
    Waitlisted,
    Cancelled,
}

impl StateMachine for AttendeeStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AttendeeStatus::*;
        matches!(
            (self, target),
            (Pending, Registered)
                | (Pending, Waitlisted)
                | (Pending, Cancelled)
                | (Waitlisted, Registered)
                | (Waitlisted, Cancelled)
                | (Registered, Waitlisted)
                | (Registered, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AttendeeStatus::*;
        match self {
            Pending => vec![Registered, Waitlisted, Cancelled],
            Registered => vec![Waitlisted, Cancelled],
            Waitlisted => vec![Registered, Cancelled],
            Cancelled => vec![],
        }
    }
}

impl fmt::Display for AttendeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttendeeStatus::Pending => "Pending",
            AttendeeStatus::Registered => "Registered",
            AttendeeStatus::Waitlisted => "Waitlisted",
            AttendeeStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", s)
    }
}
