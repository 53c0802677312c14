//! Process bootstrap for the auction server.
//!
//! Wires the engine, router, and scheduler to the external collaborators:
//! loads (or mints) the persisted identity seeds, publishes the discovery
//! identity, starts serving requests, and owns the scheduler lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::{EngineConfig, DEFAULT_CLOSE_SCAN_INTERVAL, DHT_SEED_KEY, RPC_SEED_KEY};
use crate::engine::scheduler::ClosingScheduler;
use crate::engine::{AuctionEngine, ClosureEvent};
use crate::error::{AuctionError, AuctionResult};
use crate::rpc::RequestRouter;
use crate::traits::{
    PeerDiscovery, PeerId, RandomSource, RecordStore, RequestTransport, TimeProvider,
};

/// Tunables for a running node.
#[derive(Debug, Clone, Copy)]
pub struct NodeConfig {
    pub engine: EngineConfig,
    pub close_scan_interval: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            close_scan_interval: DEFAULT_CLOSE_SCAN_INTERVAL,
        }
    }
}

/// A running auction server.
pub struct AuctionNode<S, C, R> {
    engine: Arc<AuctionEngine<S, C, R>>,
    scheduler: Arc<ClosingScheduler<S, C, R>>,
    server_id: PeerId,
    discovery_id: PeerId,
}

impl<S, C, R> AuctionNode<S, C, R>
where
    S: RecordStore + 'static,
    C: TimeProvider + Clone + Send + Sync + 'static,
    R: RandomSource + Send + Sync + 'static,
{
    /// Bring the node up: seeds, identity, request serving, scheduler.
    pub async fn start<N, D>(
        store: S,
        transport: N,
        discovery: D,
        time: C,
        random: R,
        config: NodeConfig,
    ) -> AuctionResult<Self>
    where
        N: RequestTransport,
        D: PeerDiscovery,
    {
        // Each seed is generated once and reused across restarts, so the
        // node keeps the same public identities for its whole life.
        let dht_seed = load_or_create_seed(&store, &random, DHT_SEED_KEY).await?;
        let rpc_seed = load_or_create_seed(&store, &random, RPC_SEED_KEY).await?;

        let discovery_id = discovery
            .announce(&dht_seed)
            .await
            .map_err(|e| AuctionError::Transport(format!("discovery announce failed: {e}")))?;

        let engine = Arc::new(AuctionEngine::new(store, time, random, config.engine));
        let router = Arc::new(RequestRouter::new(engine.clone()));

        let server_id = transport
            .listen(&rpc_seed, router)
            .await
            .map_err(|e| AuctionError::Transport(format!("listen failed: {e}")))?;
        info!(%server_id, %discovery_id, "auction server listening");

        let scheduler = Arc::new(ClosingScheduler::new(
            engine.clone(),
            config.close_scan_interval,
        ));
        scheduler.start();

        Ok(Self {
            engine,
            scheduler,
            server_id,
            discovery_id,
        })
    }

    /// The public identity clients dial.
    pub fn server_id(&self) -> &PeerId {
        &self.server_id
    }

    /// The identity published on the discovery layer.
    pub fn discovery_id(&self) -> &PeerId {
        &self.discovery_id
    }

    pub fn engine(&self) -> &Arc<AuctionEngine<S, C, R>> {
        &self.engine
    }

    /// Take the single closure-event receiver for a settlement consumer.
    pub fn take_closure_events(
        &self,
    ) -> Option<tokio::sync::mpsc::UnboundedReceiver<ClosureEvent>> {
        self.engine.take_closure_events()
    }

    /// Stop the background scheduler and wait for it to finish.
    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
        info!("auction server stopped");
    }
}

/// Read a 32-byte seed from the store, minting and persisting one on first run.
async fn load_or_create_seed<S: RecordStore, R: RandomSource>(
    store: &S,
    random: &R,
    key: &str,
) -> AuctionResult<[u8; 32]> {
    let existing = store
        .get(key)
        .await
        .map_err(|e| AuctionError::StoreUnavailable(e.to_string()))?;

    match existing {
        Some(bytes) => bytes
            .try_into()
            .map_err(|_| AuctionError::Serialization(format!("seed at {key} has wrong length"))),
        None => {
            let seed = random.random_bytes_32();
            store
                .put(key, seed.to_vec())
                .await
                .map_err(|e| AuctionError::StoreUnavailable(e.to_string()))?;
            info!(key, "generated new identity seed");
            Ok(seed)
        }
    }
}
