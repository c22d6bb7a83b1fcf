//! Assistance Registry - Session Registration Service
//!
//! Registers attendees into capacity-limited sessions. A full session puts
//! new attendees on a waitlist, and cancelling a registration promotes the
//! highest-priority waitlisted attendee into the freed slot.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
