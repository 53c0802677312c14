//! Mock key-value store for testing.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::traits::RecordStore;

/// Types of failures that can be simulated.
#[derive(Debug, Clone)]
pub enum MockStoreFailure {
    /// Fail all operations.
    All,
    /// Fail only read operations.
    Reads,
    /// Fail only write operations.
    Writes,
    /// Fail any operation touching a specific key.
    OnKey(String),
}

#[derive(Debug)]
struct MockStoreInner {
    /// Ordered keyspace, like the real store.
    records: RwLock<BTreeMap<String, Vec<u8>>>,
    fail_mode: RwLock<Option<MockStoreFailure>>,
}

/// In-memory key-value store.
///
/// Clones share the same underlying storage, so a "restarted" component
/// handed a clone sees everything the previous one persisted.
#[derive(Debug, Clone)]
pub struct MockStore {
    inner: Arc<MockStoreInner>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MockStoreInner {
                records: RwLock::new(BTreeMap::new()),
                fail_mode: RwLock::new(None),
            }),
        }
    }

    /// Set failure mode for testing error handling.
    pub async fn set_fail_mode(&self, mode: Option<MockStoreFailure>) {
        *self.inner.fail_mode.write().await = mode;
    }

    async fn should_fail(&self, is_write: bool, key: &str) -> bool {
        let mode = self.inner.fail_mode.read().await;
        match &*mode {
            None => false,
            Some(MockStoreFailure::All) => true,
            Some(MockStoreFailure::Reads) => !is_write,
            Some(MockStoreFailure::Writes) => is_write,
            Some(MockStoreFailure::OnKey(k)) => k == key,
        }
    }

    /// Get a snapshot of all stored data (for test assertions).
    pub async fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.inner.records.read().await.clone()
    }

    /// Check if a specific key exists.
    pub async fn has_key(&self, key: &str) -> bool {
        self.inner.records.read().await.contains_key(key)
    }

    /// Number of keys stored.
    pub async fn key_count(&self) -> usize {
        self.inner.records.read().await.len()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.should_fail(false, key).await {
            return Err(anyhow!("MockStore: simulated read failure"));
        }
        Ok(self.inner.records.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        if self.should_fail(true, key).await {
            return Err(anyhow!("MockStore: simulated write failure"));
        }
        self.inner.records.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
