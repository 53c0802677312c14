//! Test harness wiring a full auction node to in-memory mocks.
//!
//! The harness starts a real `AuctionNode` (engine, request router, closing
//! scheduler) on top of `MockStore`/`MockNetwork`/`MockTime`, and hands out a
//! client bound to the node's public identity. Requests flow through the same
//! wire encoding and router a remote peer would hit.

use std::time::Duration;

use auction_node::mocks::{MockNetwork, MockRandom, MockStore, MockTime};
use auction_node::{AuctionClient, AuctionNode, EngineConfig, NodeConfig};

/// The epoch the mock clock starts at.
pub const START_MS: u64 = 1_000_000;

/// Base seed for the harness random source; restarts derive fresh seeds
/// from it so consecutive node generations never replay the same id
/// sequence into the shared store.
const RANDOM_SEED: u64 = 0x5EED_000A_C710_0001;

/// Initialize tracing for tests.
///
/// Run with `RUST_LOG=auction_node=debug cargo test` to see engine and
/// scheduler activity interleaved with test output.
pub fn init_test_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("auction_node=info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

pub struct ServiceHarness {
    pub store: MockStore,
    pub network: MockNetwork,
    pub time: MockTime,
    pub node: AuctionNode<MockStore, MockTime, MockRandom>,
    pub client: AuctionClient<MockNetwork>,
    /// How many times this harness has been (re)started; salts the seed.
    generation: u64,
}

#[allow(dead_code)]
impl ServiceHarness {
    /// Start a node with default tunables (60s auctions, 5s extensions).
    pub async fn start() -> Self {
        Self::start_with(NodeConfig::default()).await
    }

    /// Start a node with custom tunables.
    pub async fn start_with(config: NodeConfig) -> Self {
        init_test_tracing();

        let store = MockStore::new();
        let network = MockNetwork::new();
        let time = MockTime::new(START_MS);

        let node = AuctionNode::start(
            store.clone(),
            network.clone(),
            network.clone(),
            time.clone(),
            MockRandom::new(RANDOM_SEED),
            config,
        )
        .await
        .expect("node should start against healthy mocks");

        let client = AuctionClient::new(network.clone(), node.server_id().clone());

        Self {
            store,
            network,
            time,
            node,
            client,
            generation: 0,
        }
    }

    /// Config for scenarios that need short auctions and a fast scheduler.
    pub fn fast_config(auction_duration_ms: u64) -> NodeConfig {
        NodeConfig {
            engine: EngineConfig {
                auction_duration_ms,
                ..EngineConfig::default()
            },
            close_scan_interval: Duration::from_millis(10),
        }
    }

    /// Advance the mock clock.
    pub fn advance(&self, millis: u64) {
        self.time.advance(millis);
    }

    /// Set the mock clock to an absolute timestamp.
    pub fn set_time(&self, millis: u64) {
        self.time.set(millis);
    }

    /// Stop the node and restart it on the same store and clock, as after a
    /// process restart. The old network is discarded.
    pub async fn restart(self) -> Self {
        self.node.shutdown().await;

        // Salt the seed per generation: a replayed random sequence would
        // mint auction ids already present in the shared store.
        let generation = self.generation + 1;
        let network = MockNetwork::new();
        let node = AuctionNode::start(
            self.store.clone(),
            network.clone(),
            network.clone(),
            self.time.clone(),
            MockRandom::new(RANDOM_SEED.wrapping_add(generation)),
            NodeConfig::default(),
        )
        .await
        .expect("node should restart against the same store");
        let client = AuctionClient::new(network.clone(), node.server_id().clone());

        Self {
            store: self.store,
            network,
            time: self.time,
            node,
            client,
            generation,
        }
    }

    pub async fn shutdown(self) {
        self.node.shutdown().await;
    }
}
