//! Session domain module.
//!
//! A session is a capacity-bounded event owning a registered roster and a
//! priority-ordered waitlist. All attendee status changes happen here.
//!
//! # Events
//!
//! - `SessionCreated` - Published when a new session is created
//! - `AttendeeRegistered` - Published when an attendee takes a roster slot
//! - `AttendeeWaitlisted` - Published when a full session waitlists an attendee
//! - `AttendeeCancelled` - Published when a registered attendee cancels
//! - `AttendeePromoted` - Published when the waitlist refills a freed slot

mod aggregate;
mod capacity;
mod errors;
mod events;
mod roster;

pub use aggregate::{Cancellation, Session, MAX_NAME_LENGTH};
pub use capacity::CapacityWarningLevel;
pub use errors::RegistrationError;
pub use events::{
    AttendeeCancelled, AttendeePromoted, AttendeeRegistered, AttendeeWaitlisted, SessionCreated,
};
pub use roster::AttendeeList;
