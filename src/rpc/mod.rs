//! Request/response boundary: the server-side router and the typed client.
//!
//! Exactly one transport method (`"ping"`) multiplexes every operation via a
//! `type` discriminator inside the JSON payload.

pub mod client;
pub mod router;

pub use client::{AuctionClient, BidResponse};
pub use router::RequestRouter;
