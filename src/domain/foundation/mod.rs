//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors, and the event and
//! state machine infrastructure used by the registration domain.

mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{AttendeeId, SessionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
