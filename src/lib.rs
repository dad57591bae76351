//! Auction lifecycle and concurrent bidding core for an online art
//! marketplace.
//!
//! The crate is a library invoked synchronously by a hosting web
//! application. It owns the auction state machine (sign-up, approval,
//! live bidding, soft close, settlement hand-off) and the per-auction
//! serialization that keeps concurrent bidders and racing finalizers
//! consistent. Rendering, authentication, payments, and the rest of the
//! CRUD scaffolding stay outside.

pub mod config;
pub mod engine;
pub mod error;
pub mod marketplace;
pub mod store;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use config::EngineConfig;
pub use engine::{AuctionEngine, BidAdmission, FinalizeOutcome, NoSaleReason};
pub use error::{MarketError, MarketResult};
pub use marketplace::{
    Artwork, AuctionId, AuctionOutcome, AuctionPhase, AuctionTerms, Bid, Registration,
    RegistrationStatus, ReviewDecision, SaleKind, SettlementTransaction, TransactionId,
    TransactionStatus, UserId,
};
pub use store::{MemoryBidLedger, MemorySettlementGateway, MemoryStore};
pub use traits::{BidLedger, Clock, MarketStore, SettlementGateway, SystemClock};
