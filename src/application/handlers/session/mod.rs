//! Session command and query handlers.

mod cancel_attendee;
mod create_session;
mod get_session;
mod list_sessions;
mod register_attendee;

#[cfg(test)]
mod test_support;

pub use cancel_attendee::{CancelAttendeeCommand, CancelAttendeeHandler, CancelAttendeeResult};
pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use list_sessions::ListSessionsHandler;
pub use register_attendee::{
    RegisterAttendeeCommand, RegisterAttendeeHandler, RegisterAttendeeResult,
};
