//! Trait abstractions for dependency injection and testability.
//!
//! This module provides trait-based abstractions for external collaborators
//! (the durable key-value store, peer discovery, the request transport,
//! time, and randomness), enabling unit testing without real network or
//! storage backends.

pub mod discovery;
pub mod random;
pub mod store;
pub mod time;
pub mod transport;

// Re-export all traits for crate-internal use.
// The public API surface is controlled by lib.rs re-exports.
pub use discovery::{Endpoint, PeerDiscovery, PeerId};
pub use random::RandomSource;
pub use store::RecordStore;
pub use time::TimeProvider;
pub use transport::{RequestTransport, RpcHandler};

// Re-export default implementations
pub use random::ThreadRng;
pub use time::SystemTimeProvider;
