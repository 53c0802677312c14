//! Background closing scheduler.
//!
//! A recurring task that sweeps all known auction ids and asks the engine
//! to evaluate each for closure. Owned, with an explicit start/shutdown
//! lifecycle tied to the node rather than an ambient global timer.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::engine::AuctionEngine;
use crate::traits::{RandomSource, RecordStore, TimeProvider};

/// Periodically sweeps open auctions for closure.
///
/// Ticks never overlap: one task runs the loop, and a sweep completes (or
/// fails) before the next sleep begins. One auction's failure is logged and
/// never blocks evaluation of the others.
pub struct ClosingScheduler<S, C, R> {
    engine: Arc<AuctionEngine<S, C, R>>,
    interval: Duration,
    shutdown: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl<S, C, R> ClosingScheduler<S, C, R>
where
    S: RecordStore + 'static,
    C: TimeProvider + Clone + Send + Sync + 'static,
    R: RandomSource + Send + Sync + 'static,
{
    pub fn new(engine: Arc<AuctionEngine<S, C, R>>, interval: Duration) -> Self {
        Self {
            engine,
            interval,
            shutdown: CancellationToken::new(),
            handle: Mutex::new(None),
        }
    }

    /// Spawn the sweep loop. Calling more than once has no effect.
    pub fn start(self: &Arc<Self>) {
        let mut guard = self.handle.lock();
        if guard.is_some() {
            return;
        }

        info!(interval_ms = self.interval.as_millis() as u64, "starting closing scheduler");
        let scheduler = self.clone();
        let token = self.shutdown.clone();

        *guard = Some(tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = token.cancelled() => {
                        info!("closing scheduler shutting down");
                        break;
                    }
                    () = tokio::time::sleep(scheduler.interval) => {}
                }

                scheduler.sweep_once().await;
            }
        }));
    }

    /// One full sweep: enumerate ids, evaluate each independently.
    pub async fn sweep_once(&self) {
        let ids = match self.engine.list_auctions().await {
            Ok(ids) => ids,
            Err(e) => {
                // Store trouble aborts only this tick; the next one retries.
                warn!("closing sweep could not list auctions: {e}");
                return;
            }
        };

        debug!(auctions = ids.len(), "closing sweep");
        for id in ids {
            if let Err(e) = self.engine.evaluate_and_close(&id).await {
                warn!(auction_id = %id, "failed to evaluate auction for closure: {e}");
            }
        }
    }

    /// Cancel the sweep loop and wait for it to finish.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}
