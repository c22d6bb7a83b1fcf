//! Mock ports shared by the registration handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, SessionId};
use crate::domain::session::Session;
use crate::ports::{EventPublisher, SessionStore};

pub struct MockSessionStore {
    sessions: Mutex<Vec<Session>>,
    saved: Mutex<Vec<Session>>,
    fail_save: bool,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
            fail_save: false,
        }
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.sessions.lock().unwrap().push(session);
        store
    }

    pub fn failing_with(session: Session) -> Self {
        Self {
            sessions: Mutex::new(vec![session]),
            saved: Mutex::new(Vec::new()),
            fail_save: true,
        }
    }

    pub fn saved_sessions(&self) -> Vec<Session> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        if self.fail_save {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated save failure",
            ));
        }
        let mut sessions = self.sessions.lock().unwrap();
        sessions.retain(|s| s.id() != session.id());
        sessions.push(session.clone());
        self.saved.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Session>, DomainError> {
        Ok(self.sessions.lock().unwrap().clone())
    }
}

pub struct MockEventPublisher {
    published_events: Mutex<Vec<EventEnvelope>>,
    fail_publish: bool,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            published_events: Mutex::new(Vec::new()),
            fail_publish: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            published_events: Mutex::new(Vec::new()),
            fail_publish: true,
        }
    }

    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published_events.lock().unwrap().clone()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.published_events()
            .into_iter()
            .map(|e| e.event_type)
            .collect()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.fail_publish {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Simulated publish failure",
            ));
        }
        self.published_events.lock().unwrap().push(event);
        Ok(())
    }
}

pub fn session_with_capacity(capacity: u32) -> Session {
    Session::new(SessionId::new("123").unwrap(), "Session 1", capacity).unwrap()
}
