//! Integration tests for the registration flow.
//!
//! Drives `RegistrationService` over the in-memory store and event bus:
//! 1. Registration fills the roster, then the waitlist
//! 2. Cancellation promotes by priority score and is persisted
//! 3. Events are published in order for every change

use std::sync::Arc;

use assistance_registry::adapters::{InMemoryEventBus, InMemorySessionStore, LoggingEventPublisher};
use assistance_registry::application::{
    CreateSessionCommand, RegisterAttendeeCommand, RegistrationService,
};
use assistance_registry::domain::attendee::AttendeeStatus;
use assistance_registry::domain::foundation::{AttendeeId, CommandMetadata, SessionId};
use assistance_registry::domain::session::{CapacityWarningLevel, RegistrationError};
use assistance_registry::ports::SessionStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    service: RegistrationService,
    store: Arc<InMemorySessionStore>,
    events: Arc<InMemoryEventBus>,
}

async fn harness(capacity: u32) -> Harness {
    let store = Arc::new(InMemorySessionStore::new());
    let events = Arc::new(InMemoryEventBus::new());
    let service = RegistrationService::new(store.clone(), events.clone());

    service
        .create_session(
            CreateSessionCommand {
                session_id: session_id(),
                name: "Session 1".to_string(),
                max_capacity: capacity,
            },
            CommandMetadata::new(),
        )
        .await
        .unwrap();
    events.clear();

    Harness {
        service,
        store,
        events,
    }
}

fn session_id() -> SessionId {
    SessionId::new("123").unwrap()
}

fn register(name: &str, is_vip: bool, tier: &str) -> RegisterAttendeeCommand {
    RegisterAttendeeCommand {
        session_id: session_id(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        is_vip,
        tier: tier.to_string(),
    }
}

impl Harness {
    async fn register(&self, name: &str, is_vip: bool, tier: &str) -> (AttendeeId, AttendeeStatus) {
        let result = self
            .service
            .register_attendee(register(name, is_vip, tier), CommandMetadata::new())
            .await
            .unwrap();
        (result.attendee_id, result.status)
    }

    async fn cancel(&self, attendee_id: AttendeeId) -> bool {
        self.service
            .cancel_attendee(&session_id(), &attendee_id, CommandMetadata::new())
            .await
            .unwrap()
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn gold_vip_is_promoted_after_cancellation() {
    let h = harness(1).await;

    let (a, a_status) = h.register("A", false, "Standard").await;
    let (b, b_status) = h.register("B", true, "Gold").await;
    assert_eq!(a_status, AttendeeStatus::Registered);
    assert_eq!(b_status, AttendeeStatus::Waitlisted);

    assert!(h.cancel(a).await);

    let session = h.service.get_session(&session_id()).await.unwrap();
    let roster: Vec<_> = session.registered_attendees().ids().copied().collect();
    assert_eq!(roster, vec![b]);
    assert!(session.waitlisted_attendees().is_empty());
    assert_eq!(
        session.find_attendee(&b).unwrap().status(),
        AttendeeStatus::Registered
    );
    assert_eq!(session.find_attendee(&b).unwrap().priority_score(), 240);
}

#[tokio::test]
async fn higher_score_wins_the_freed_slot() {
    let h = harness(2).await;

    let (first, _) = h.register("First", false, "Standard").await;
    h.register("Second", false, "Standard").await;
    let (premium_vip, _) = h.register("PremiumVip", true, "Premium").await;
    let (gold, _) = h.register("Gold", false, "Gold").await;

    assert!(h.cancel(first).await);

    let session = h.service.get_session(&session_id()).await.unwrap();
    assert!(session.registered_attendees().contains(&gold));
    assert!(session.waitlisted_attendees().contains(&premium_vip));
    assert_eq!(session.waitlisted_attendees().len(), 1);
}

#[tokio::test]
async fn equal_scores_promote_earliest_waitlisted() {
    let h = harness(1).await;

    let (holder, _) = h.register("Holder", false, "Gold").await;
    let (early, _) = h.register("Early", false, "Premium").await;
    h.register("Late", false, "premium").await;

    h.cancel(holder).await;

    let session = h.service.get_session(&session_id()).await.unwrap();
    assert!(session.registered_attendees().contains(&early));
}

#[tokio::test]
async fn cancelling_waitlisted_or_unknown_attendee_changes_nothing() {
    let h = harness(1).await;
    h.register("A", false, "Standard").await;
    let (waiting, _) = h.register("B", false, "Standard").await;
    let before = h.store.find_by_id(&session_id()).await.unwrap().unwrap();
    h.events.clear();

    assert!(!h.cancel(waiting).await);
    assert!(!h.cancel(AttendeeId::new()).await);

    let after = h.store.find_by_id(&session_id()).await.unwrap().unwrap();
    assert_eq!(before, after);
    assert_eq!(h.events.event_count(), 0);
}

#[tokio::test]
async fn cancellation_is_persisted() {
    let h = harness(2).await;
    let (a, _) = h.register("A", false, "Standard").await;

    assert!(h.cancel(a).await);

    let stored = h.store.find_by_id(&session_id()).await.unwrap().unwrap();
    assert!(stored.find_attendee(&a).is_none());
    assert!(stored.is_capacity_available());
}

#[tokio::test]
async fn cancelled_attendee_cannot_be_cancelled_again() {
    let h = harness(1).await;
    let (a, _) = h.register("A", false, "Standard").await;

    assert!(h.cancel(a).await);
    assert!(!h.cancel(a).await);
}

#[tokio::test]
async fn warning_level_is_reported_on_registration() {
    let h = harness(5).await;
    let mut levels = Vec::new();
    for name in ["A", "B", "C", "D"] {
        let result = h
            .service
            .register_attendee(register(name, false, "Standard"), CommandMetadata::new())
            .await
            .unwrap();
        levels.push(result.warning_level);
    }

    assert_eq!(
        levels,
        vec![
            CapacityWarningLevel::None,
            CapacityWarningLevel::None,
            CapacityWarningLevel::HalfFull,
            CapacityWarningLevel::NearlyFull,
        ]
    );
}

#[tokio::test]
async fn events_follow_the_flow() {
    let h = harness(1).await;
    let (a, _) = h.register("A", false, "Standard").await;
    h.register("B", true, "Gold").await;
    h.cancel(a).await;

    let types: Vec<_> = h
        .events
        .published_events()
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        types,
        vec![
            "attendee.registered.v1",
            "attendee.waitlisted.v1",
            "attendee.cancelled.v1",
            "attendee.promoted.v1",
        ]
    );
    assert_eq!(h.events.events_for_aggregate("123").len(), 4);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let h = harness(1).await;
    let missing = SessionId::new("missing").unwrap();

    let mut cmd = register("A", false, "Gold");
    cmd.session_id = missing.clone();
    let result = h.service.register_attendee(cmd, CommandMetadata::new()).await;
    assert_eq!(result, Err(RegistrationError::NotFound(missing.clone())));

    let result = h.service.get_session(&missing).await;
    assert!(matches!(result, Err(RegistrationError::NotFound(_))));
}

#[tokio::test]
async fn list_sessions_returns_all() {
    let h = harness(1).await;
    h.service
        .create_session(
            CreateSessionCommand {
                session_id: SessionId::new("456").unwrap(),
                name: "Workshop".to_string(),
                max_capacity: 10,
            },
            CommandMetadata::new(),
        )
        .await
        .unwrap();

    let sessions = h.service.list_sessions().await.unwrap();
    let ids: Vec<String> = sessions.iter().map(|s| s.id().to_string()).collect();
    assert_eq!(ids, vec!["123", "456"]);
}

#[tokio::test]
async fn concurrent_cancels_promote_each_waitlisted_once() {
    let h = Arc::new(harness(2).await);
    let (a, _) = h.register("A", false, "Standard").await;
    let (b, _) = h.register("B", false, "Standard").await;
    h.register("C", false, "Gold").await;
    h.register("D", false, "Premium").await;
    h.register("E", false, "Standard").await;

    let (h1, h2) = (h.clone(), h.clone());
    let (r1, r2) = tokio::join!(
        tokio::spawn(async move { h1.cancel(a).await }),
        tokio::spawn(async move { h2.cancel(b).await }),
    );
    assert!(r1.unwrap());
    assert!(r2.unwrap());

    let session = h.service.get_session(&session_id()).await.unwrap();
    assert_eq!(session.registered_attendees().len(), 2);
    assert_eq!(session.waitlisted_attendees().len(), 1);
    let remaining = session.waitlisted_attendees().at(0).unwrap();
    assert_eq!(remaining.name(), "E");
}

#[tokio::test]
async fn server_wiring_with_logging_publisher_handles_many_registrations() {
    let store = Arc::new(InMemorySessionStore::new());
    let service = RegistrationService::new(store.clone(), Arc::new(LoggingEventPublisher::new()));
    service
        .create_session(
            CreateSessionCommand {
                session_id: session_id(),
                name: "Session 1".to_string(),
                max_capacity: 10,
            },
            CommandMetadata::new(),
        )
        .await
        .unwrap();

    for i in 0..200 {
        service
            .register_attendee(register(&format!("p{}", i), false, "Standard"), CommandMetadata::new())
            .await
            .unwrap();
    }

    let stored = store.find_by_id(&session_id()).await.unwrap().unwrap();
    assert_eq!(stored.registered_attendees().len(), 10);
    assert_eq!(stored.waitlisted_attendees().len(), 190);
}
