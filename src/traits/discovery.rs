//! Peer discovery abstraction.
//!
//! The server is reachable only by a public identity, never by a network
//! address. The discovery layer derives that identity from a persisted seed,
//! publishes it, and resolves identities to reachable endpoints for callers.

use anyhow::Result;
use async_trait::async_trait;

/// Public identity of a peer (hex-encoded public key).
pub type PeerId = String;

/// A resolved, reachable endpoint for a peer.
pub type Endpoint = String;

/// Abstraction over the identity-resolution layer.
#[async_trait]
pub trait PeerDiscovery: Send + Sync + Clone {
    /// Derive this node's public identity from `seed` and publish it so
    /// that other peers can resolve it. Idempotent per seed.
    async fn announce(&self, seed: &[u8; 32]) -> Result<PeerId>;

    /// Resolve a published identity to a reachable endpoint.
    ///
    /// Returns `None` if the identity is unknown to the network.
    async fn resolve(&self, peer: &PeerId) -> Result<Option<Endpoint>>;
}
