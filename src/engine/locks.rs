//! Per-auction-id mutual exclusion.
//!
//! The store offers no compare-and-set, so every operation that reads and
//! later rewrites the same auction record must hold that id's lock across
//! the whole span. Operations on different ids never block each other.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Map from auction id to its async lock, created on first access.
///
/// Entries live for the process lifetime; the id space is small enough in a
/// single-writer deployment that eviction is not worth its complexity here.
#[derive(Debug, Clone, Default)]
pub struct IdLockMap {
    locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl IdLockMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for `id`.
    ///
    /// The returned handle must be `.lock().await`ed before reading the
    /// record and the guard dropped only after the write completes or fails.
    pub fn lock_for(&self, id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock();
        locks
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Number of ids that have been locked at least once.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}
