pub mod artwork;
pub mod bid;
pub mod lifecycle;
pub mod registration;
pub mod settlement;

pub use artwork::{Artwork, AuctionId, AuctionOutcome, AuctionPhase, AuctionTerms, UserId};
pub use bid::Bid;
pub use lifecycle::PhaseUpdate;
pub use registration::{Registration, RegistrationStatus, ReviewDecision};
pub use settlement::{SaleKind, SettlementTransaction, TransactionId, TransactionStatus};
