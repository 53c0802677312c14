//! Auction domain model and pure bidding rules.

pub mod record;
pub mod validate;

pub use record::{Auction, AuctionStatus, Bid};
pub use validate::{BidValidator, RejectReason};
