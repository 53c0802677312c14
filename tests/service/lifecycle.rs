//! End-to-end auction lifecycle through the client request path.

use serde_json::json;

use auction_node::{AuctionError, AuctionStatus, BidResponse};

use crate::common::harness::START_MS;
use crate::common::ServiceHarness;

#[tokio::test]
async fn test_create_bid_and_read_back_history() {
    let harness = ServiceHarness::start().await;

    let auction = harness
        .client
        .create_auction("u1", json!({ "name": "sunset.jpg", "size": 512 }))
        .await
        .unwrap();
    assert_eq!(auction.owner_id, "u1");
    assert_eq!(auction.status, AuctionStatus::Open);
    assert!(auction.history.is_empty());

    // First bid opens the history, an undercut is refused, a raise lands.
    let r = harness.client.bid_auction(&auction.id, "u2", 10).await.unwrap();
    assert_eq!(r, BidResponse::Ok);

    let r = harness.client.bid_auction(&auction.id, "u3", 5).await.unwrap();
    assert_eq!(r, BidResponse::Rejected("invalid_bid_size".to_string()));

    let r = harness.client.bid_auction(&auction.id, "u3", 20).await.unwrap();
    assert_eq!(r, BidResponse::Ok);

    let record = harness.client.get_auction(&auction.id).await.unwrap().unwrap();
    let amounts: Vec<u64> = record.history.iter().map(|b| b.amount).collect();
    assert_eq!(amounts, vec![10, 20]);
    assert_eq!(record.history[1].bidder_id, "u3");

    harness.shutdown().await;
}

#[tokio::test]
async fn test_listing_reflects_creation_order() {
    let harness = ServiceHarness::start().await;

    assert!(harness.client.list_auctions().await.unwrap().is_empty());

    let first = harness.client.create_auction("u1", json!({})).await.unwrap();
    let ids = harness.client.list_auctions().await.unwrap();
    assert_eq!(ids, vec![first.id.clone()]);

    let second = harness.client.create_auction("u2", json!({})).await.unwrap();
    let ids = harness.client.list_auctions().await.unwrap();
    assert_eq!(ids, vec![first.id, second.id]);

    harness.shutdown().await;
}

#[tokio::test]
async fn test_each_accepted_bid_extends_the_close() {
    // 1s auctions so the extension dominates the base duration.
    let harness = ServiceHarness::start_with(ServiceHarness::fast_config(1_000)).await;

    let auction = harness.client.create_auction("u1", json!({})).await.unwrap();
    assert_eq!(auction.base_expiration, START_MS + 1_000);

    harness.advance(500);
    let r = harness.client.bid_auction(&auction.id, "u2", 10).await.unwrap();
    assert_eq!(r, BidResponse::Ok);

    // Past the base expiration but inside the 5s extension window.
    harness.set_time(START_MS + 2_000);
    assert!(harness
        .node
        .engine()
        .evaluate_and_close(&auction.id)
        .await
        .unwrap()
        .is_none());
    let record = harness.client.get_auction(&auction.id).await.unwrap().unwrap();
    assert_eq!(record.status, AuctionStatus::Open);
    assert_eq!(record.effective_close_ms(), START_MS + 6_000);

    // Past base + extension the auction closes with the bid as winner.
    harness.set_time(START_MS + 7_000);
    let event = harness
        .node
        .engine()
        .evaluate_and_close(&auction.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.winning_bid.map(|b| b.amount), Some(10));

    let record = harness.client.get_auction(&auction.id).await.unwrap().unwrap();
    assert_eq!(record.status, AuctionStatus::Closed);

    harness.shutdown().await;
}

#[tokio::test]
async fn test_scheduler_closes_expired_auction() {
    let harness = ServiceHarness::start_with(ServiceHarness::fast_config(1_000)).await;
    let mut events = harness.node.take_closure_events().unwrap();

    let auction = harness.client.create_auction("u1", json!({})).await.unwrap();
    harness.client.bid_auction(&auction.id, "u2", 30).await.unwrap();

    harness.set_time(START_MS + 10_000);

    // The 10ms scan picks it up without any explicit close call.
    let event = tokio::time::timeout(std::time::Duration::from_secs(5), events.recv())
        .await
        .expect("scheduler should close the auction")
        .unwrap();
    assert_eq!(event.auction_id, auction.id);
    assert_eq!(event.winning_bid.map(|b| b.amount), Some(30));

    let record = harness.client.get_auction(&auction.id).await.unwrap().unwrap();
    assert_eq!(record.status, AuctionStatus::Closed);

    harness.shutdown().await;
}

#[tokio::test]
async fn test_bids_after_close_are_refused() {
    let harness = ServiceHarness::start().await;

    let auction = harness.client.create_auction("u1", json!({})).await.unwrap();
    harness.client.bid_auction(&auction.id, "u2", 10).await.unwrap();

    harness.set_time(START_MS + 120_000);
    harness
        .node
        .engine()
        .evaluate_and_close(&auction.id)
        .await
        .unwrap();

    // Even an otherwise valid raise, at any clock value.
    harness.set_time(START_MS);
    let r = harness.client.bid_auction(&auction.id, "u3", 1_000).await.unwrap();
    assert_eq!(r, BidResponse::Rejected("auction_closed".to_string()));

    harness.shutdown().await;
}

#[tokio::test]
async fn test_late_bid_on_open_auction_is_refused() {
    let harness = ServiceHarness::start().await;

    let auction = harness.client.create_auction("u1", json!({})).await.unwrap();

    harness.set_time(auction.effective_close_ms() + 1);
    let r = harness.client.bid_auction(&auction.id, "u2", 10).await.unwrap();
    assert_eq!(r, BidResponse::Rejected("invalid_bid_time".to_string()));

    harness.shutdown().await;
}

#[tokio::test]
async fn test_unknown_auction_id() {
    let harness = ServiceHarness::start().await;

    let record = harness.client.get_auction("no-such-id").await.unwrap();
    assert!(record.is_none());

    let result = harness.client.bid_auction("no-such-id", "u2", 10).await;
    assert!(matches!(result, Err(AuctionError::NotFound(_))));

    harness.shutdown().await;
}
