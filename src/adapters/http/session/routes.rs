//! HTTP routes for session endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    cancel_attendee, create_session, get_session, list_sessions, register_attendee,
    SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route("/registerattendee", post(register_attendee))
        .route("/cancel/:session_id/:attendee_id", delete(cancel_attendee))
        .route("/:id", get(get_session))
        .with_state(handlers)
}
