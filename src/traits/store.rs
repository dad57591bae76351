//! Persistence abstractions for artworks, registrations, and the bid ledger.

use async_trait::async_trait;

use crate::error::MarketResult;
use crate::marketplace::{Artwork, AuctionId, Bid, Registration, UserId};

/// Persistence boundary for artworks and auction registrations.
///
/// Implementations are cheap-to-clone handles (the in-memory store is an
/// `Arc` around its maps; a database-backed store would be a pool handle).
/// Mutual exclusion is NOT this trait's job: the engine serializes all
/// read-modify-write sequences per auction before calling in here.
#[async_trait]
pub trait MarketStore: Clone + Send + Sync + 'static {
    /// Fetch an artwork by id, or `None` if it does not exist.
    async fn load_artwork(&self, id: AuctionId) -> MarketResult<Option<Artwork>>;

    /// Insert a freshly created artwork.
    async fn insert_artwork(&self, artwork: Artwork) -> MarketResult<()>;

    /// Persist the current state of an existing artwork.
    async fn save_artwork(&self, artwork: &Artwork) -> MarketResult<()>;

    /// Fetch the registration for an (artwork, user) pair, if any.
    async fn registration(
        &self,
        artwork: AuctionId,
        user: UserId,
    ) -> MarketResult<Option<Registration>>;

    /// Create a registration iff none exists for its (artwork, user) pair.
    ///
    /// Returns `true` when the registration was created, `false` when the
    /// unique constraint already held a row. This is the create-if-absent
    /// primitive backing the one-sign-up-per-user rule.
    async fn try_insert_registration(&self, registration: Registration) -> MarketResult<bool>;

    /// Persist an updated registration (status / review timestamp).
    async fn save_registration(&self, registration: &Registration) -> MarketResult<()>;

    /// All registrations for an artwork, in sign-up order.
    async fn registrations_for(&self, artwork: AuctionId) -> MarketResult<Vec<Registration>>;
}

/// Append-only store of bids per auction.
///
/// Bids are immutable once appended; the ledger is the source of truth the
/// denormalized highest-bid cache on [`Artwork`] must always agree with.
#[async_trait]
pub trait BidLedger: Clone + Send + Sync + 'static {
    /// Append a bid, assigning it the next per-auction sequence number.
    async fn append(
        &self,
        artwork: AuctionId,
        bidder: UserId,
        amount: u64,
        now: u64,
    ) -> MarketResult<Bid>;

    /// The winning-order maximum bid (amount desc, timestamp desc, seq desc).
    async fn highest(&self, artwork: AuctionId) -> MarketResult<Option<Bid>>;

    /// All bids for an auction in append order.
    async fn bids_for(&self, artwork: AuctionId) -> MarketResult<Vec<Bid>>;
}
