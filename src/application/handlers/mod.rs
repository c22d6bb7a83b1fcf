//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod session;

pub use session::{
    CancelAttendeeCommand, CancelAttendeeHandler, CancelAttendeeResult, CreateSessionCommand,
    CreateSessionHandler, CreateSessionResult, GetSessionHandler, GetSessionQuery,
    ListSessionsHandler, RegisterAttendeeCommand, RegisterAttendeeHandler, RegisterAttendeeResult,
};
