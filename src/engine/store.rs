//! Typed JSON layer over the raw key-value store.
//!
//! Owns (de)serialization of domain records. Absence of a key is always an
//! explicit `None`, never a default record.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AuctionError, AuctionResult};
use crate::traits::RecordStore;

/// Typed get/put over an untyped byte store.
#[derive(Debug, Clone)]
pub struct JsonStore<S> {
    store: S,
}

impl<S: RecordStore> JsonStore<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Read and decode the record under `key`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> AuctionResult<Option<T>> {
        let bytes = self
            .store
            .get(key)
            .await
            .map_err(|e| AuctionError::StoreUnavailable(e.to_string()))?;

        match bytes {
            Some(data) => {
                let value = serde_json::from_slice(&data).map_err(|e| {
                    AuctionError::Serialization(format!("record at {key} is malformed: {e}"))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Encode and write `value` under `key`, overwriting any previous record.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> AuctionResult<()> {
        let data = serde_json::to_vec(value)
            .map_err(|e| AuctionError::Serialization(e.to_string()))?;

        self.store
            .put(key, data)
            .await
            .map_err(|e| AuctionError::StoreUnavailable(e.to_string()))
    }
}
