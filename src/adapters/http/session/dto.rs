//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{CancelAttendeeResult, RegisterAttendeeResult};
use crate::domain::attendee::{Attendee, AttendeeStatus, RegistrationTier};
use crate::domain::session::{CapacityWarningLevel, Session};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to register an attendee. camelCase field names are accepted too.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterAttendeeRequest {
    #[serde(alias = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "isVip")]
    pub is_vip: bool,
    /// Free-form tier; unknown values register as Standard.
    #[serde(default, alias = "registrationTier", alias = "tier")]
    pub registration_tier: String,
}

/// Request to create a new session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub id: String,
    pub name: String,
    #[serde(alias = "maxCapacity")]
    pub max_capacity: u32,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for a registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAttendeeResponse {
    pub attendee_id: String,
    pub status: AttendeeStatus,
    pub warning_level: CapacityWarningLevel,
}

impl From<RegisterAttendeeResult> for RegisterAttendeeResponse {
    fn from(result: RegisterAttendeeResult) -> Self {
        Self {
            attendee_id: result.attendee_id.to_string(),
            status: result.status,
            warning_level: result.warning_level,
        }
    }
}

/// Response for a cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAttendeeResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoted_attendee_id: Option<String>,
}

impl From<CancelAttendeeResult> for CancelAttendeeResponse {
    fn from(result: CancelAttendeeResult) -> Self {
        let message = match result.promoted {
            Some(_) => "Attendee cancelled; next waitlisted attendee promoted",
            None => "Attendee cancelled",
        };
        Self {
            message: message.to_string(),
            promoted_attendee_id: result.promoted.map(|id| id.to_string()),
        }
    }
}

/// Attendee as shown inside a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_vip: bool,
    pub tier: RegistrationTier,
    pub priority_score: u32,
    pub status: AttendeeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
}

impl From<&Attendee> for AttendeeResponse {
    fn from(attendee: &Attendee) -> Self {
        Self {
            id: attendee.id().to_string(),
            name: attendee.name().to_string(),
            email: attendee.email().to_string(),
            is_vip: attendee.is_vip(),
            tier: attendee.tier(),
            priority_score: attendee.priority_score(),
            status: attendee.status(),
            registration_date: attendee.registration_date().map(|at| at.to_rfc3339()),
        }
    }
}

/// Detailed session view for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub name: String,
    pub max_capacity: u32,
    pub available_slots: u32,
    pub warning_level: CapacityWarningLevel,
    pub registered_attendees: Vec<AttendeeResponse>,
    pub waitlisted_attendees: Vec<AttendeeResponse>,
    pub created_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            name: session.name().to_string(),
            max_capacity: session.max_capacity(),
            available_slots: session.available_slots(),
            warning_level: session.capacity_warning_level(),
            registered_attendees: session.registered_attendees().iter().map(Into::into).collect(),
            waitlisted_attendees: session.waitlisted_attendees().iter().map(Into::into).collect(),
            created_at: session.created_at().to_rfc3339(),
        }
    }
}

/// Session summary for list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummaryResponse {
    pub id: String,
    pub name: String,
    pub max_capacity: u32,
    pub registered_count: usize,
    pub waitlisted_count: usize,
    pub warning_level: CapacityWarningLevel,
}

impl From<&Session> for SessionSummaryResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            name: session.name().to_string(),
            max_capacity: session.max_capacity(),
            registered_count: session.registered_attendees().len(),
            waitlisted_count: session.waitlisted_attendees().len(),
            warning_level: session.capacity_warning_level(),
        }
    }
}

/// List of sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub items: Vec<SessionSummaryResponse>,
    pub total: usize,
}

impl From<Vec<Session>> for SessionListResponse {
    fn from(sessions: Vec<Session>) -> Self {
        Self {
            total: sessions.len(),
            items: sessions.iter().map(Into::into).collect(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AttendeeId, SessionId};

    #[test]
    fn register_request_accepts_camel_case() {
        let json = r#"{"sessionId": "123", "name": "Ana", "email": "ana@example.com",
                       "isVip": true, "registrationTier": "Gold"}"#;
        let req: RegisterAttendeeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.session_id, "123");
        assert!(req.is_vip);
        assert_eq!(req.registration_tier, "Gold");
    }

    #[test]
    fn register_request_defaults_optional_fields() {
        let req: RegisterAttendeeRequest =
            serde_json::from_str(r#"{"session_id": "123", "name": "Ana"}"#).unwrap();
        assert!(!req.is_vip);
        assert!(req.email.is_empty());
        assert!(req.registration_tier.is_empty());
    }

    #[test]
    fn session_response_lists_both_rosters() {
        let mut session = Session::new(SessionId::new("123").unwrap(), "Session 1", 1).unwrap();
        session
            .register_attendee(Attendee::new(AttendeeId::new(), "A", "a@example.com", false, "Standard"))
            .unwrap();
        session
            .add_to_waitlist(Attendee::new(AttendeeId::new(), "B", "b@example.com", true, "Gold"))
            .unwrap();

        let response = SessionResponse::from(&session);

        assert_eq!(response.available_slots, 0);
        assert_eq!(response.warning_level, CapacityWarningLevel::NearlyFull);
        assert_eq!(response.registered_attendees.len(), 1);
        assert_eq!(response.waitlisted_attendees[0].priority_score, 240);
        assert_eq!(response.waitlisted_attendees[0].status, AttendeeStatus::Waitlisted);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["warning_level"], "nearly_full");
        assert_eq!(json["registered_attendees"][0]["status"], "registered");
    }

    #[test]
    fn cancel_response_mentions_promotion() {
        let response = CancelAttendeeResponse::from(CancelAttendeeResult {
            cancelled: true,
            promoted: Some(AttendeeId::new()),
        });
        assert!(response.promoted_attendee_id.is_some());
        assert!(response.message.contains("promoted"));
    }
}
