//! Server-side request router.
//!
//! Decodes inbound payloads, dispatches to the engine, and serializes
//! results back to bytes. Malformed payloads are rejected before reaching
//! the engine; engine failures are converted to generic error responses at
//! this boundary rather than ever tearing down a request task.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::auction::RejectReason;
use crate::config::RPC_METHOD;
use crate::engine::{AuctionEngine, BidOutcome};
use crate::error::AuctionError;
use crate::traits::{RandomSource, RecordStore, RpcHandler, TimeProvider};

/// Inbound operation payloads. Field names are part of the wire contract.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Request {
    CreateAuction {
        user_id: String,
        picture_meta: serde_json::Value,
    },
    BidAuction {
        auction_id: String,
        user_id: String,
        amount: u64,
    },
    ListAuctions {},
    GetAuction {
        auction_id: String,
    },
}

/// Maps opaque requests to engine operations.
pub struct RequestRouter<S, C, R> {
    engine: Arc<AuctionEngine<S, C, R>>,
}

impl<S, C, R> RequestRouter<S, C, R>
where
    S: RecordStore,
    C: TimeProvider + Clone,
    R: RandomSource,
{
    pub fn new(engine: Arc<AuctionEngine<S, C, R>>) -> Self {
        Self { engine }
    }

    async fn dispatch(&self, request: Request) -> serde_json::Value {
        match request {
            Request::CreateAuction { user_id, picture_meta } => {
                match self.engine.create_auction(&user_id, picture_meta).await {
                    Ok(auction) => json!(auction),
                    Err(e) => Self::error_response(&e),
                }
            }
            Request::BidAuction { auction_id, user_id, amount } => {
                match self.engine.bid_auction(&auction_id, &user_id, amount).await {
                    Ok(BidOutcome::Accepted(_)) => json!("ok"),
                    Ok(BidOutcome::Rejected(reason)) => json!(reason.wire_code()),
                    Err(e) => Self::error_response(&e),
                }
            }
            Request::ListAuctions {} => match self.engine.list_auctions().await {
                Ok(ids) => json!(ids),
                Err(e) => Self::error_response(&e),
            },
            Request::GetAuction { auction_id } => {
                match self.engine.get_auction(&auction_id).await {
                    Ok(auction) => json!(auction), // null when absent
                    Err(e) => Self::error_response(&e),
                }
            }
        }
    }

    fn error_response(error: &AuctionError) -> serde_json::Value {
        let code = match error {
            AuctionError::NotFound(_) => "not_found",
            AuctionError::StoreUnavailable(_) => "store_unavailable",
            AuctionError::MalformedRequest(_) => "malformed_request",
            _ => "internal",
        };
        warn!("request failed: {error}");
        json!({ "error": code })
    }

    fn malformed(detail: &str) -> Vec<u8> {
        debug!("rejecting malformed request: {detail}");
        serde_json::to_vec(&json!({ "error": "malformed_request" }))
            .unwrap_or_else(|_| b"{}".to_vec())
    }
}

#[async_trait]
impl<S, C, R> RpcHandler for RequestRouter<S, C, R>
where
    S: RecordStore,
    C: TimeProvider + Clone + Send + Sync,
    R: RandomSource + Send + Sync,
{
    async fn handle(&self, method: &str, payload: &[u8]) -> Vec<u8> {
        if method != RPC_METHOD {
            return Self::malformed("unknown method");
        }

        let request: Request = match serde_json::from_slice(payload) {
            Ok(request) => request,
            Err(e) => return Self::malformed(&e.to_string()),
        };

        let response = self.dispatch(request).await;
        serde_json::to_vec(&response).unwrap_or_else(|_| b"{}".to_vec())
    }
}
