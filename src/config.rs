//! Configuration constants for the auction service.
//!
//! This module centralizes magic numbers and reserved store keys
//! to improve maintainability and enable easier tuning.

use std::time::Duration;

/// Default nominal auction duration in milliseconds.
///
/// `base_expiration` for a new auction is `now + DEFAULT_AUCTION_DURATION_MS`.
pub const DEFAULT_AUCTION_DURATION_MS: u64 = 60_000;

/// Default closing-time extension granted by each accepted bid (anti-sniping),
/// in milliseconds.
pub const DEFAULT_BID_EXTENSION_MS: u64 = 5_000;

/// Interval between closing-scheduler sweeps.
pub const DEFAULT_CLOSE_SCAN_INTERVAL: Duration = Duration::from_secs(5);

/// Reserved store key holding the ordered list of all auction ids.
pub const AUCTION_LIST_KEY: &str = "auction_list";

/// Reserved store key holding the persistent discovery-identity seed.
pub const DHT_SEED_KEY: &str = "dht-seed";

/// Reserved store key holding the persistent request-handling identity seed.
pub const RPC_SEED_KEY: &str = "rpc-seed";

/// The single RPC method name; operation types are multiplexed inside the
/// payload via a `type` discriminator.
pub const RPC_METHOD: &str = "ping";

/// Tunables for the auction engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Nominal auction lifetime in milliseconds, before any extension.
    pub auction_duration_ms: u64,
    /// Extension attached to every accepted bid, in milliseconds.
    pub bid_extension_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auction_duration_ms: DEFAULT_AUCTION_DURATION_MS,
            bid_extension_ms: DEFAULT_BID_EXTENSION_MS,
        }
    }
}
