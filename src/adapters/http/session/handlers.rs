//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::application::{CreateSessionCommand, RegisterAttendeeCommand, RegistrationService};
use crate::domain::foundation::{AttendeeId, CommandMetadata, SessionId};
use crate::domain::session::RegistrationError;

use super::dto::{
    CancelAttendeeResponse, CreateSessionRequest, ErrorResponse, RegisterAttendeeRequest,
    RegisterAttendeeResponse, SessionListResponse, SessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    service: Arc<RegistrationService>,
}

impl SessionHandlers {
    pub fn new(service: Arc<RegistrationService>) -> Self {
        Self { service }
    }
}

fn request_metadata() -> CommandMetadata {
    CommandMetadata::new()
        .with_correlation_id(Uuid::new_v4().to_string())
        .with_source("api")
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions - List all sessions
pub async fn list_sessions(State(handlers): State<SessionHandlers>) -> Response {
    match handlers.service.list_sessions().await {
        Ok(sessions) => {
            let response: SessionListResponse = sessions.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_registration_error(e),
    }
}

/// POST /api/sessions - Create a new session
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let session_id = match req.id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid session ID"),
    };

    let cmd = CreateSessionCommand {
        session_id,
        name: req.name,
        max_capacity: req.max_capacity,
    };

    match handlers.service.create_session(cmd, request_metadata()).await {
        Ok(result) => {
            let response = SessionResponse::from(&result.session);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_registration_error(e),
    }
}

/// GET /api/sessions/:id - Get session details
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid session ID"),
    };

    match handlers.service.get_session(&session_id).await {
        Ok(session) => {
            let response = SessionResponse::from(&session);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_registration_error(e),
    }
}

/// POST /api/sessions/registerattendee - Register an attendee
pub async fn register_attendee(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<RegisterAttendeeRequest>,
) -> Response {
    if req.name.trim().is_empty() || req.email.trim().is_empty() {
        return bad_request("Invalid attendee registration data");
    }
    let session_id = match req.session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid session ID"),
    };

    let cmd = RegisterAttendeeCommand {
        session_id,
        name: req.name,
        email: req.email,
        is_vip: req.is_vip,
        tier: req.registration_tier,
    };

    match handlers.service.register_attendee(cmd, request_metadata()).await {
        Ok(result) => {
            let response: RegisterAttendeeResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_registration_error(e),
    }
}

/// DELETE /api/sessions/cancel/:session_id/:attendee_id - Cancel a registration
pub async fn cancel_attendee(
    State(handlers): State<SessionHandlers>,
    Path((session_id, attendee_id)): Path<(String, String)>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid session ID"),
    };
    let attendee_id = match attendee_id.parse::<AttendeeId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid attendee ID"),
    };

    match handlers
        .service
        .cancel_attendee_detailed(&session_id, &attendee_id, request_metadata())
        .await
    {
        Ok(result) if result.cancelled => {
            let response: CancelAttendeeResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Attendee not found")),
        )
            .into_response(),
        Err(e) => handle_registration_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn handle_registration_error(error: RegistrationError) -> Response {
    match error {
        RegistrationError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(error.message())),
        )
            .into_response(),
        RegistrationError::ValidationFailed { .. } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.message())),
        )
            .into_response(),
        RegistrationError::AlreadyExists(_) | RegistrationError::CapacityExceeded => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(error.message())),
        )
            .into_response(),
        RegistrationError::InvalidState(_) | RegistrationError::Infrastructure(_) => {
            tracing::error!("Request failed: {}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}
