//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - Keyed storage for Session aggregates
//! - `EventPublisher` - Port for publishing domain events

mod event_publisher;
mod session_store;

pub use event_publisher::EventPublisher;
pub use session_store::SessionStore;
