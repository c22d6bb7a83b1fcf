//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `attendee` - Attendee entity, tier and registration status
//! - `session` - Session aggregate, roster, waitlist and registration events

pub mod attendee;
pub mod foundation;
pub mod session;
