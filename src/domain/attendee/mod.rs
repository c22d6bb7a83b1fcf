//! Attendee domain module.
//!
//! Identity, tier, VIP flag, derived priority score and the registration
//! status state machine of a single participant.

mod entity;
mod status;
mod tier;

pub use entity::{Attendee, VIP_SCORE_FACTOR};
pub use status::AttendeeStatus;
pub use tier::RegistrationTier;
