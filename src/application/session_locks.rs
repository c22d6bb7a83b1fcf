//! Per-session exclusive access.
//!
//! Register and cancel are read-check-write sequences over a whole session.
//! Holding the session's guard for the full sequence serializes them within
//! this process. Separate processes sharing a store are not coordinated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::SessionId;

/// Guard proving exclusive access to one session id. Released on drop.
pub type SessionGuard = OwnedMutexGuard<()>;

/// Registry of one async mutex per session id.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<SessionId, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `id`.
    ///
    /// Locks nobody holds or waits on are pruned on each call.
    pub async fn acquire(&self, id: &SessionId) -> SessionGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|key, lock| key == id || Arc::strong_count(lock) > 1);
            locks
                .entry(id.clone())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Number of tracked session locks.
    pub fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
