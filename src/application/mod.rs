//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (register, cancel, create) take the per-session lock;
//! query handlers read straight from the store.

pub mod handlers;
mod registration_service;
mod session_locks;

pub use handlers::{
    CancelAttendeeCommand, CancelAttendeeHandler, CancelAttendeeResult, CreateSessionCommand,
    CreateSessionHandler, CreateSessionResult, GetSessionHandler, GetSessionQuery,
    ListSessionsHandler, RegisterAttendeeCommand, RegisterAttendeeHandler, RegisterAttendeeResult,
};
pub use registration_service::RegistrationService;
pub use session_locks::{SessionGuard, SessionLocks};
