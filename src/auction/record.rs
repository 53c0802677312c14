use serde::{Deserialize, Serialize};

/// Status of an auction.
///
/// Transitions are monotonic: `Open` → `Closed` → `Settled`, never back.
/// `Settled` is a reserved terminal state for the out-of-scope settlement
/// process; nothing in this crate produces it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    /// Accepting bids.
    Open,
    /// Past its effective closing time; no further bids.
    Closed,
    /// Settlement completed (future work).
    Settled,
}

/// One accepted bid against an auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Id of the auction this bid was accepted into (lookup key).
    pub auction_id: String,

    /// Identifier of the bidding user.
    pub bidder_id: String,

    /// Bid amount; strictly greater than every previously accepted amount.
    pub amount: u64,

    /// Unix timestamp in milliseconds, assigned by the engine at acceptance.
    pub accepted_at: u64,

    /// Milliseconds this bid extends the effective closing time (anti-sniping).
    pub extension: u64,
}

/// The record tracking one item for sale, its bid history, and its status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    /// Opaque unique identifier, generated at creation.
    pub id: String,

    /// Identifier of the creating user.
    pub owner_id: String,

    /// Opaque metadata describing the auctioned item.
    pub item: serde_json::Value,

    /// Accepted bids, append-only, ordered by acceptance time.
    /// Amounts are strictly increasing along this sequence.
    pub history: Vec<Bid>,

    /// Nominal close time (Unix ms) set at creation, before any extension.
    pub base_expiration: u64,

    /// Current lifecycle status.
    pub status: AuctionStatus,
}

impl Auction {
    /// Create a fresh open auction with an empty history.
    pub fn new(id: String, owner_id: String, item: serde_json::Value, base_expiration: u64) -> Self {
        Self {
            id,
            owner_id,
            item,
            history: Vec::new(),
            base_expiration,
            status: AuctionStatus::Open,
        }
    }

    /// Effective closing time: `base_expiration` plus the sum of all
    /// extensions granted by accepted bids. Non-decreasing as bids append.
    pub fn effective_close_ms(&self) -> u64 {
        self.history
            .iter()
            .fold(self.base_expiration, |close, bid| close.saturating_add(bid.extension))
    }

    /// The current winning bid: the last (highest) element of the history.
    pub fn winning_bid(&self) -> Option<&Bid> {
        self.history.last()
    }

    pub fn is_open(&self) -> bool {
        self.status == AuctionStatus::Open
    }

    /// Whether the auction is past its effective closing time at `now_ms`.
    pub fn has_expired_at(&self, now_ms: u64) -> bool {
        now_ms > self.effective_close_ms()
    }
}
