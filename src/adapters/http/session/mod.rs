//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AttendeeResponse, CancelAttendeeResponse, CreateSessionRequest, ErrorResponse,
    RegisterAttendeeRequest, RegisterAttendeeResponse, SessionListResponse, SessionResponse,
    SessionSummaryResponse,
};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
