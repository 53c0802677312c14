//! Auction lifecycle engine: creation, bidding, and closing.
//!
//! Every state-changing operation on an auction record is serialized per
//! auction id (see [`locks::IdLockMap`]); this is the one concurrency
//! mechanism that prevents two racing bids (or a bid racing the closing
//! scheduler) from reading the same history and silently losing an update.

pub mod locks;
pub mod repository;
pub mod scheduler;
pub mod store;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::auction::{Auction, Bid, BidValidator, RejectReason};
use crate::config::EngineConfig;
use crate::error::{AuctionError, AuctionResult};
use crate::traits::{RandomSource, RecordStore, TimeProvider};

use locks::IdLockMap;
use repository::AuctionRepository;
use store::JsonStore;

/// Result of a bid attempt against an existing auction.
#[derive(Debug, Clone)]
pub enum BidOutcome {
    /// Bid appended; carries the updated auction record.
    Accepted(Auction),
    /// Bid refused; the record was not touched.
    Rejected(RejectReason),
}

impl BidOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Emitted once per auction when the engine transitions it to `Closed`,
/// for consumption by the (out-of-scope) settlement collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosureEvent {
    pub auction_id: String,
    /// The last accepted bid, or `None` for an auction that drew no bids.
    pub winning_bid: Option<Bid>,
}

/// The core state machine orchestrating creation, bidding, and closing.
pub struct AuctionEngine<S, C, R> {
    repo: AuctionRepository<S, C, R>,
    validator: BidValidator,
    time: C,
    locks: IdLockMap,
    closure_tx: mpsc::UnboundedSender<ClosureEvent>,
    closure_rx: Mutex<Option<mpsc::UnboundedReceiver<ClosureEvent>>>,
}

impl<S, C, R> AuctionEngine<S, C, R>
where
    S: RecordStore,
    C: TimeProvider + Clone,
    R: RandomSource,
{
    pub fn new(store: S, time: C, random: R, config: EngineConfig) -> Self {
        let repo = AuctionRepository::new(
            JsonStore::new(store),
            time.clone(),
            random,
            config.auction_duration_ms,
        );
        let (closure_tx, closure_rx) = mpsc::unbounded_channel();

        Self {
            repo,
            validator: BidValidator::new(config.bid_extension_ms),
            time,
            locks: IdLockMap::new(),
            closure_tx,
            closure_rx: Mutex::new(Some(closure_rx)),
        }
    }

    /// Take the closure-event receiver. Single consumer; subsequent calls
    /// return `None`.
    pub fn take_closure_events(&self) -> Option<mpsc::UnboundedReceiver<ClosureEvent>> {
        self.closure_rx.lock().take()
    }

    /// Create a new open auction owned by `owner_id`.
    pub async fn create_auction(
        &self,
        owner_id: &str,
        item: serde_json::Value,
    ) -> AuctionResult<Auction> {
        self.repo.create(owner_id, item).await
    }

    /// Attempt a bid. Load → status check → validate against the live
    /// history → append → persist, all under the auction's id lock.
    pub async fn bid_auction(
        &self,
        auction_id: &str,
        bidder_id: &str,
        amount: u64,
    ) -> AuctionResult<BidOutcome> {
        let lock = self.locks.lock_for(auction_id);
        let _guard = lock.lock().await;

        let Some(mut auction) = self.repo.get(auction_id).await? else {
            return Err(AuctionError::NotFound(auction_id.to_string()));
        };

        if !auction.is_open() {
            debug!(auction_id, "bid rejected: auction no longer open");
            return Ok(BidOutcome::Rejected(RejectReason::AuctionClosed));
        }

        let now = self.time.now_millis();
        let effective_close = auction.effective_close_ms();

        let extension = match self
            .validator
            .validate(amount, &auction.history, effective_close, now)
        {
            Ok(extension) => extension,
            Err(reason) => {
                debug!(auction_id, bidder_id, amount, ?reason, "bid rejected");
                return Ok(BidOutcome::Rejected(reason));
            }
        };

        auction.history.push(Bid {
            auction_id: auction.id.clone(),
            bidder_id: bidder_id.to_string(),
            amount,
            accepted_at: now,
            extension,
        });
        self.repo.save(&auction).await?;

        info!(auction_id, bidder_id, amount, "bid accepted");
        Ok(BidOutcome::Accepted(auction))
    }

    /// Evaluate one auction for closure. Idempotent: a no-op unless the
    /// auction is open and past its effective closing time, recomputed from
    /// the live history so a just-accepted extension is never missed.
    pub async fn evaluate_and_close(&self, auction_id: &str) -> AuctionResult<Option<ClosureEvent>> {
        let lock = self.locks.lock_for(auction_id);
        let _guard = lock.lock().await;

        let Some(mut auction) = self.repo.get(auction_id).await? else {
            return Err(AuctionError::NotFound(auction_id.to_string()));
        };

        if !auction.is_open() {
            return Ok(None);
        }

        let now = self.time.now_millis();
        if !auction.has_expired_at(now) {
            return Ok(None);
        }

        auction.status = crate::auction::AuctionStatus::Closed;
        self.repo.save(&auction).await?;

        let event = ClosureEvent {
            auction_id: auction.id.clone(),
            winning_bid: auction.winning_bid().cloned(),
        };
        match &event.winning_bid {
            Some(bid) => info!(
                auction_id,
                winner = %bid.bidder_id,
                amount = bid.amount,
                "auction closed"
            ),
            None => info!(auction_id, "auction closed with no bids"),
        }

        // Settlement consumer may be absent; closure itself already persisted.
        let _ = self.closure_tx.send(event.clone());
        Ok(Some(event))
    }

    /// Fetch one auction record.
    pub async fn get_auction(&self, auction_id: &str) -> AuctionResult<Option<Auction>> {
        self.repo.get(auction_id).await
    }

    /// All auction ids in creation order.
    pub async fn list_auctions(&self) -> AuctionResult<Vec<String>> {
        self.repo.list_ids().await
    }
}
