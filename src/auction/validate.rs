//! Pure bid validation.
//!
//! No I/O and no clock access; everything the decision needs is passed in,
//! so the rules are fully unit-testable without the store.

use serde::{Deserialize, Serialize};

use crate::auction::record::Bid;
use crate::config::DEFAULT_BID_EXTENSION_MS;

/// Why a proposed bid was rejected.
///
/// Rejections are expected, frequent, and part of normal operation; they are
/// returned as data and never treated as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Amount is zero or does not beat the current highest accepted bid.
    InvalidAmount,
    /// The auction's effective closing time has passed.
    Expired,
    /// The auction is no longer open.
    AuctionClosed,
}

impl RejectReason {
    /// Stable wire code, distinguishable by callers.
    pub const fn wire_code(self) -> &'static str {
        match self {
            Self::InvalidAmount => "invalid_bid_size",
            Self::Expired => "invalid_bid_time",
            Self::AuctionClosed => "auction_closed",
        }
    }
}

/// Decides whether a proposed bid is acceptable given current auction state.
#[derive(Debug, Clone, Copy)]
pub struct BidValidator {
    /// Extension granted to every accepted bid, in milliseconds.
    extension_ms: u64,
}

impl Default for BidValidator {
    fn default() -> Self {
        Self::new(DEFAULT_BID_EXTENSION_MS)
    }
}

impl BidValidator {
    pub const fn new(extension_ms: u64) -> Self {
        Self { extension_ms }
    }

    /// Validate a proposed `amount` against the accepted history and the
    /// effective closing time.
    ///
    /// Rules are checked in order, first failure wins:
    /// 1. `InvalidAmount` if the amount does not strictly exceed the last
    ///    accepted amount (or is zero when the history is empty).
    /// 2. `Expired` if `now_ms` is past `effective_close_ms`.
    ///
    /// On success returns the extension to attach to the new bid.
    pub fn validate(
        &self,
        amount: u64,
        history: &[Bid],
        effective_close_ms: u64,
        now_ms: u64,
    ) -> Result<u64, RejectReason> {
        let floor = history.last().map(|b| b.amount).unwrap_or(0);
        if amount <= floor {
            return Err(RejectReason::InvalidAmount);
        }

        if now_ms > effective_close_ms {
            return Err(RejectReason::Expired);
        }

        Ok(self.extension_ms)
    }
}
