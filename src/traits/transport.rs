//! Request/response transport abstraction for testable network operations.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::discovery::PeerId;

/// Server-side handler for inbound requests.
///
/// The request router implements this; the transport calls it once per
/// delivered request and ships the returned bytes back to the caller.
#[async_trait]
pub trait RpcHandler: Send + Sync {
    /// Handle one named-method request carrying an opaque payload.
    async fn handle(&self, method: &str, payload: &[u8]) -> Vec<u8>;
}

/// Abstraction over the request/response transport.
///
/// Delivers opaque byte payloads between a client and a server addressed by
/// public identity; the discovery layer resolves the identity to an
/// endpoint underneath.
#[async_trait]
pub trait RequestTransport: Send + Sync + Clone {
    /// Send a request to `server` and await its response payload.
    async fn request(&self, server: &PeerId, method: &str, payload: Vec<u8>) -> Result<Vec<u8>>;

    /// Start serving inbound requests with `handler`.
    ///
    /// Derives the server's request-handling identity from `seed` and
    /// returns the public `PeerId` clients dial.
    async fn listen(&self, seed: &[u8; 32], handler: Arc<dyn RpcHandler>) -> Result<PeerId>;
}
