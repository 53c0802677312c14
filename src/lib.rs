//! Peer-discoverable auction service.
//!
//! Clients reach the server through a public identity resolved by an
//! external discovery layer; auction records live in an external durable
//! key-value store. This crate implements the part with real invariants:
//! the auction lifecycle and bidding engine, the anti-sniping
//! expiration-extension rules, and the closing scheduler that runs safely
//! concurrently with live bidding. Storage, discovery, and transport are
//! trait seams with in-memory mocks for testing.

pub mod auction;
pub mod config;
pub mod engine;
pub mod error;
pub mod node;
pub mod rpc;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use auction::{Auction, AuctionStatus, Bid, BidValidator, RejectReason};
pub use config::{EngineConfig, DEFAULT_BID_EXTENSION_MS, DEFAULT_CLOSE_SCAN_INTERVAL};
pub use engine::locks::IdLockMap;
pub use engine::repository::AuctionRepository;
pub use engine::scheduler::ClosingScheduler;
pub use engine::store::JsonStore;
pub use engine::{AuctionEngine, BidOutcome, ClosureEvent};
pub use error::{AuctionError, AuctionResult};
pub use node::{AuctionNode, NodeConfig};
pub use rpc::{AuctionClient, BidResponse, RequestRouter};
pub use traits::{
    PeerDiscovery, PeerId, RandomSource, RecordStore, RequestTransport, RpcHandler,
    SystemTimeProvider, TimeProvider,
};
