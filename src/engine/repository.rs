//! CRUD access to auction records and the auction-id index.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Builder;

use crate::auction::Auction;
use crate::config::AUCTION_LIST_KEY;
use crate::engine::store::JsonStore;
use crate::error::AuctionResult;
use crate::traits::{RandomSource, RecordStore, TimeProvider};

/// Repository over the typed store: one key per auction record, plus the
/// reserved index key enumerating every auction id ever created.
pub struct AuctionRepository<S, C, R> {
    store: JsonStore<S>,
    time: C,
    random: R,
    auction_duration_ms: u64,
    /// Serializes read-modify-write of the shared index so concurrent
    /// creates cannot drop each other's entries.
    index_lock: Arc<tokio::sync::Mutex<()>>,
}

impl<S, C, R> AuctionRepository<S, C, R>
where
    S: RecordStore,
    C: TimeProvider,
    R: RandomSource,
{
    pub fn new(store: JsonStore<S>, time: C, random: R, auction_duration_ms: u64) -> Self {
        Self {
            store,
            time,
            random,
            auction_duration_ms,
            index_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Allocate a fresh id and persist a new open auction.
    ///
    /// The record write and the index append are two independent store
    /// operations; a crash between them leaves a record without an index
    /// entry, which is accepted and documented. Either write failing
    /// surfaces `StoreUnavailable` and is not retried here.
    pub async fn create(&self, owner_id: &str, item: serde_json::Value) -> AuctionResult<Auction> {
        let id = Builder::from_random_bytes(self.random.random_bytes_16())
            .into_uuid()
            .to_string();
        let base_expiration = self.time.now_millis() + self.auction_duration_ms;

        let auction = Auction::new(id.clone(), owner_id.to_string(), item, base_expiration);
        self.store.put_json(&id, &auction).await?;

        {
            let _guard = self.index_lock.lock().await;
            let mut ids = self.list_ids().await?;
            ids.push(id.clone());
            self.store.put_json(AUCTION_LIST_KEY, &ids).await?;
        }

        info!(auction_id = %id, owner_id, "created auction");
        Ok(auction)
    }

    /// Fetch one auction record, `None` if the id was never created.
    pub async fn get(&self, id: &str) -> AuctionResult<Option<Auction>> {
        self.store.get_json(id).await
    }

    /// Full-record overwrite.
    ///
    /// The store has no field-level merge, so callers must supply the
    /// complete record after mutating it in memory.
    pub async fn save(&self, auction: &Auction) -> AuctionResult<()> {
        debug!(auction_id = %auction.id, bids = auction.history.len(), "saving auction");
        self.store.put_json(&auction.id, auction).await
    }

    /// All auction ids in creation order; empty if the index was never written.
    pub async fn list_ids(&self) -> AuctionResult<Vec<String>> {
        Ok(self
            .store
            .get_json::<Vec<String>>(AUCTION_LIST_KEY)
            .await?
            .unwrap_or_default())
    }
}
