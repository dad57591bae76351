//! Trait abstractions for dependency injection and testability.
//!
//! The engine never reads the wall clock or touches storage directly;
//! every external collaborator comes in through one of these traits so the
//! lifecycle logic stays deterministic under test.

pub mod settlement;
pub mod store;
pub mod time;

pub use settlement::SettlementGateway;
pub use store::{BidLedger, MarketStore};
pub use time::{Clock, SystemClock};
