//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to the outside world:
//! - `events` - Logging publisher and in-memory event bus
//! - `storage` - In-memory session store
//! - `http` - axum REST API

pub mod events;
pub mod http;
pub mod storage;

pub use events::{InMemoryEventBus, LoggingEventPublisher};
pub use http::app_router;
pub use storage::InMemorySessionStore;
