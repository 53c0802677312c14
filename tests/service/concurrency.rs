//! Concurrency tests: racing clients and a racing scheduler.

use serde_json::json;

use auction_node::{AuctionStatus, BidResponse};

use crate::common::harness::START_MS;
use crate::common::ServiceHarness;

#[tokio::test]
async fn test_racing_bidders_never_lose_an_accepted_bid() {
    let harness = ServiceHarness::start().await;
    let auction = harness.client.create_auction("owner", json!({})).await.unwrap();

    // Amounts arrive out of order from independent client tasks.
    let amounts: Vec<u64> = vec![40, 10, 90, 20, 70, 30, 100, 50, 80, 60];
    let mut handles = Vec::new();
    for (i, amount) in amounts.into_iter().enumerate() {
        let client = harness.client.clone();
        let id = auction.id.clone();
        handles.push(tokio::spawn(async move {
            client
                .bid_auction(&id, &format!("bidder-{i}"), amount)
                .await
                .unwrap()
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap() == BidResponse::Ok {
            accepted += 1;
        }
    }

    let record = harness.client.get_auction(&auction.id).await.unwrap().unwrap();
    assert_eq!(record.history.len(), accepted);
    assert!(record
        .history
        .windows(2)
        .all(|pair| pair[1].amount > pair[0].amount));
    // Whatever the interleaving, 100 beats every possible floor.
    assert_eq!(record.winning_bid().unwrap().amount, 100);

    harness.shutdown().await;
}

#[tokio::test]
async fn test_racing_creates_all_reach_the_index() {
    let harness = ServiceHarness::start().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = harness.client.clone();
        handles.push(tokio::spawn(async move {
            client
                .create_auction(&format!("user-{i}"), json!({}))
                .await
                .unwrap()
                .id
        }));
    }

    let mut created = Vec::new();
    for handle in handles {
        created.push(handle.await.unwrap());
    }

    let mut ids = harness.client.list_auctions().await.unwrap();
    assert_eq!(ids.len(), 8);
    ids.sort();
    created.sort();
    assert_eq!(ids, created);

    harness.shutdown().await;
}

#[tokio::test]
async fn test_bidding_while_scheduler_closes_keeps_invariants() {
    let harness = ServiceHarness::start_with(ServiceHarness::fast_config(1_000)).await;
    let mut events = harness.node.take_closure_events().unwrap();

    let auction = harness.client.create_auction("owner", json!({})).await.unwrap();

    // Bid while the clock walks forward and the 10ms scan runs alongside.
    // Each accepted bid extends the close by 5s against a 1s clock step, so
    // the auction stays open for as long as bidders keep raising.
    let mut accepted = 0;
    for i in 0..20u64 {
        let r = harness
            .client
            .bid_auction(&auction.id, &format!("bidder-{i}"), (i + 1) * 10)
            .await
            .unwrap();
        if r == BidResponse::Ok {
            accepted += 1;
        }
        harness.advance(1_000);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    // With each bid extending 5s and the clock jumping 1s per round, the
    // auction outlives the base duration but must close well before +100s.
    harness.set_time(START_MS + 200_000);
    let event = tokio::time::timeout(std::time::Duration::from_secs(5), events.recv())
        .await
        .expect("scheduler should eventually close the auction")
        .unwrap();
    assert_eq!(event.auction_id, auction.id);

    let record = harness.client.get_auction(&auction.id).await.unwrap().unwrap();
    assert_eq!(record.status, AuctionStatus::Closed);
    assert_eq!(record.history.len(), accepted);
    assert!(record
        .history
        .windows(2)
        .all(|pair| pair[1].amount > pair[0].amount));

    // Once closed, nothing gets through.
    let r = harness
        .client
        .bid_auction(&auction.id, "late", 1_000_000)
        .await
        .unwrap();
    assert_eq!(r, BidResponse::Rejected("auction_closed".to_string()));

    harness.shutdown().await;
}
