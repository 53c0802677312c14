//! Typed client for the auction service.
//!
//! Builds the JSON operation payloads, sends them over the transport to a
//! server known only by its public identity, and decodes the responses.

use serde_json::json;
use tracing::debug;

use crate::auction::Auction;
use crate::config::RPC_METHOD;
use crate::error::{AuctionError, AuctionResult};
use crate::traits::{PeerId, RequestTransport};

/// Outcome of a bid as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidResponse {
    /// The server accepted the bid.
    Ok,
    /// The server rejected the bid with a stable reason code
    /// (`invalid_bid_size`, `invalid_bid_time`, or `auction_closed`).
    Rejected(String),
}

/// Client bound to one server identity.
#[derive(Debug, Clone)]
pub struct AuctionClient<T> {
    transport: T,
    server: PeerId,
}

impl<T: RequestTransport> AuctionClient<T> {
    pub fn new(transport: T, server: PeerId) -> Self {
        Self { transport, server }
    }

    async fn call(&self, payload: serde_json::Value) -> AuctionResult<serde_json::Value> {
        let raw = serde_json::to_vec(&payload)
            .map_err(|e| AuctionError::Serialization(e.to_string()))?;

        debug!(server = %self.server, "sending request");
        let response = self
            .transport
            .request(&self.server, RPC_METHOD, raw)
            .await
            .map_err(|e| AuctionError::Transport(e.to_string()))?;

        serde_json::from_slice(&response)
            .map_err(|e| AuctionError::Serialization(format!("bad response: {e}")))
    }

    fn check_error(value: &serde_json::Value) -> AuctionResult<()> {
        if let Some(code) = value.get("error").and_then(|e| e.as_str()) {
            return match code {
                "not_found" => Err(AuctionError::NotFound("auction".to_string())),
                "store_unavailable" => Err(AuctionError::StoreUnavailable(code.to_string())),
                "malformed_request" => Err(AuctionError::MalformedRequest(code.to_string())),
                other => Err(AuctionError::Transport(format!("server error: {other}"))),
            };
        }
        Ok(())
    }

    /// Create an auction for `user_id` over the given item metadata.
    pub async fn create_auction(
        &self,
        user_id: &str,
        picture_meta: serde_json::Value,
    ) -> AuctionResult<Auction> {
        let response = self
            .call(json!({
                "type": "create_auction",
                "user_id": user_id,
                "picture_meta": picture_meta,
            }))
            .await?;

        Self::check_error(&response)?;
        serde_json::from_value(response)
            .map_err(|e| AuctionError::Serialization(format!("bad auction record: {e}")))
    }

    /// Place a bid. Rejections come back as data, never as `Err`.
    pub async fn bid_auction(
        &self,
        auction_id: &str,
        user_id: &str,
        amount: u64,
    ) -> AuctionResult<BidResponse> {
        let response = self
            .call(json!({
                "type": "bid_auction",
                "auction_id": auction_id,
                "user_id": user_id,
                "amount": amount,
            }))
            .await?;

        Self::check_error(&response)?;
        match response.as_str() {
            Some("ok") => Ok(BidResponse::Ok),
            Some(reason) => Ok(BidResponse::Rejected(reason.to_string())),
            None => Err(AuctionError::Serialization(
                "bid response was not a string".to_string(),
            )),
        }
    }

    /// All auction ids known to the server, in creation order.
    pub async fn list_auctions(&self) -> AuctionResult<Vec<String>> {
        let response = self.call(json!({ "type": "list_auctions" })).await?;

        Self::check_error(&response)?;
        serde_json::from_value(response)
            .map_err(|e| AuctionError::Serialization(format!("bad id list: {e}")))
    }

    /// Fetch one auction record; `None` if the server does not know the id.
    pub async fn get_auction(&self, auction_id: &str) -> AuctionResult<Option<Auction>> {
        let response = self
            .call(json!({ "type": "get_auction", "auction_id": auction_id }))
            .await?;

        if response.is_null() {
            return Ok(None);
        }
        Self::check_error(&response)?;
        serde_json::from_value(response)
            .map(Some)
            .map_err(|e| AuctionError::Serialization(format!("bad auction record: {e}")))
    }
}
