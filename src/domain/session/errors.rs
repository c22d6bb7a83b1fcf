//! Registration error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Errors surfaced by registration commands and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Session was not found.
    NotFound(SessionId),
    /// An attendee transition violated its state machine.
    InvalidState(String),
    /// Registration attempted on a full roster.
    CapacityExceeded,
    /// A session with this id already exists.
    AlreadyExists(SessionId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl RegistrationError {
    pub fn not_found(id: SessionId) -> Self {
        RegistrationError::NotFound(id)
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        RegistrationError::InvalidState(message.into())
    }
    pub fn capacity_exceeded() -> Self {
        RegistrationError::CapacityExceeded
    }
    pub fn already_exists(id: SessionId) -> Self {
        RegistrationError::AlreadyExists(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RegistrationError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        RegistrationError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistrationError::NotFound(_) => ErrorCode::SessionNotFound,
            RegistrationError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            RegistrationError::CapacityExceeded => ErrorCode::CapacityExceeded,
            RegistrationError::AlreadyExists(_) => ErrorCode::AlreadyExists,
            RegistrationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            RegistrationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            RegistrationError::NotFound(id) => format!("Session not found: {}", id),
            RegistrationError::InvalidState(msg) => format!("Invalid state: {}", msg),
            RegistrationError::CapacityExceeded => "No capacity available".to_string(),
            RegistrationError::AlreadyExists(id) => format!("Session already exists: {}", id),
            RegistrationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            RegistrationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RegistrationError {}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => match err.detail("session_id").map(SessionId::new) {
                Some(Ok(id)) => RegistrationError::NotFound(id),
                _ => RegistrationError::Infrastructure(err.to_string()),
            },
            ErrorCode::InvalidStateTransition => RegistrationError::InvalidState(err.message),
            ErrorCode::CapacityExceeded => RegistrationError::CapacityExceeded,
            ErrorCode::ValidationFailed => RegistrationError::ValidationFailed {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => RegistrationError::Infrastructure(err.to_string()),
        }
    }
}
