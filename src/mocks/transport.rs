//! In-memory network: loopback transport plus discovery registry.
//!
//! A single `MockNetwork` plays both external roles — identity resolution
//! and request delivery — so a client and a server wired to clones of the
//! same network can exchange requests entirely in process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::traits::{Endpoint, PeerDiscovery, PeerId, RequestTransport, RpcHandler};

#[derive(Default)]
struct MockNetworkInner {
    /// Registered request handlers by server identity.
    handlers: RwLock<HashMap<PeerId, Arc<dyn RpcHandler>>>,
    /// Identities published via the discovery layer.
    announced: RwLock<HashMap<PeerId, Endpoint>>,
    /// Whether requests should fail (unreachable network).
    fail_requests: RwLock<bool>,
    /// Total requests delivered.
    request_count: AtomicU64,
}

/// Shared in-memory network; clones see the same peers.
#[derive(Clone, Default)]
pub struct MockNetwork {
    inner: Arc<MockNetworkInner>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity a given seed maps to on this network.
    pub fn peer_id_for_seed(seed: &[u8; 32]) -> PeerId {
        hex::encode(seed)
    }

    /// Simulate the network becoming unreachable.
    pub async fn set_fail_requests(&self, fail: bool) {
        *self.inner.fail_requests.write().await = fail;
    }

    /// Number of requests delivered so far.
    pub fn request_count(&self) -> u64 {
        self.inner.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RequestTransport for MockNetwork {
    async fn request(&self, server: &PeerId, method: &str, payload: Vec<u8>) -> Result<Vec<u8>> {
        if *self.inner.fail_requests.read().await {
            return Err(anyhow!("MockNetwork: simulated request failure"));
        }

        let handler = self
            .inner
            .handlers
            .read()
            .await
            .get(server)
            .cloned()
            .ok_or_else(|| anyhow!("MockNetwork: no server listening at {server}"))?;

        self.inner.request_count.fetch_add(1, Ordering::SeqCst);
        Ok(handler.handle(method, &payload).await)
    }

    async fn listen(&self, seed: &[u8; 32], handler: Arc<dyn RpcHandler>) -> Result<PeerId> {
        let peer_id = Self::peer_id_for_seed(seed);
        self.inner
            .handlers
            .write()
            .await
            .insert(peer_id.clone(), handler);
        Ok(peer_id)
    }
}

#[async_trait]
impl PeerDiscovery for MockNetwork {
    async fn announce(&self, seed: &[u8; 32]) -> Result<PeerId> {
        let peer_id = Self::peer_id_for_seed(seed);
        self.inner
            .announced
            .write()
            .await
            .insert(peer_id.clone(), format!("mock://{peer_id}"));
        Ok(peer_id)
    }

    async fn resolve(&self, peer: &PeerId) -> Result<Option<Endpoint>> {
        Ok(self.inner.announced.read().await.get(peer).cloned())
    }
}
