//! Event publisher adapters.
//!
//! - `LoggingEventPublisher` - server wiring; logs each event and drops it
//! - `InMemoryEventBus` - records events for test assertions

mod in_memory;
mod logging;

pub use in_memory::InMemoryEventBus;
pub use logging::LoggingEventPublisher;
