//! Key-value store abstraction for testable persistence.

use anyhow::Result;
use async_trait::async_trait;

/// Abstraction over the durable ordered key-value store.
///
/// Implementations persist across restarts and expose a flat keyspace of
/// opaque byte values. One key per auction record, plus reserved keys for
/// the auction index and the per-process identity seeds.
///
/// The store offers no compare-and-set and no field-level merge; every
/// mutation is a full-value overwrite. The engine's per-id exclusion
/// substitutes for missing store-side concurrency control.
#[async_trait]
pub trait RecordStore: Send + Sync + Clone {
    /// Get the value stored under `key`.
    ///
    /// Returns `None` if the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;
}
