//! In-memory mock implementations of the external-collaborator traits.
//!
//! Everything here is deterministic and self-contained, so engine, router,
//! and node behavior can be tested without a real network, DHT, or storage
//! backend.

pub mod random;
pub mod store;
pub mod time;
pub mod transport;

pub use random::MockRandom;
pub use store::{MockStore, MockStoreFailure};
pub use time::MockTime;
pub use transport::MockNetwork;
