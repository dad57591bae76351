//! The auction engine: lifecycle refresh, sign-up gating, bid admission,
//! and finalization behind per-auction mutual exclusion.
//!
//! Every operation follows the same shape: acquire the auction's lock with
//! a bounded wait, load, refresh the phase via the pure state machine,
//! apply the operation's own checks and mutations, persist once, release.
//! Operations on different auctions never contend with each other.

mod admission;
mod configure;
mod finalize;
mod gate;

pub use admission::BidAdmission;
pub use finalize::{FinalizeOutcome, NoSaleReason};

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{MarketError, MarketResult};
use crate::marketplace::{lifecycle, Artwork, AuctionId, AuctionPhase, Bid, Registration};
use crate::traits::{BidLedger, Clock, MarketStore, SettlementGateway};

type LockRegistry = Arc<parking_lot::Mutex<HashMap<AuctionId, Arc<Mutex<()>>>>>;

/// Marketplace core engine.
///
/// Generic over its collaborators so the lifecycle logic can be driven by
/// a mock clock and in-memory stores under test, and by real
/// implementations in the hosting application.
#[derive(Clone)]
pub struct AuctionEngine<S, L, X, C>
where
    S: MarketStore,
    L: BidLedger,
    X: SettlementGateway,
    C: Clock + Clone + 'static,
{
    store: S,
    ledger: L,
    settlement: X,
    clock: C,
    config: EngineConfig,
    locks: LockRegistry,
}

impl<S, L, X, C> AuctionEngine<S, L, X, C>
where
    S: MarketStore,
    L: BidLedger,
    X: SettlementGateway,
    C: Clock + Clone + 'static,
{
    pub fn new(store: S, ledger: L, settlement: X, clock: C) -> Self {
        Self::with_config(store, ledger, settlement, clock, EngineConfig::default())
    }

    pub fn with_config(
        store: S,
        ledger: L,
        settlement: X,
        clock: C,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            ledger,
            settlement,
            clock,
            config,
            locks: Arc::new(parking_lot::Mutex::new(HashMap::new())),
        }
    }

    /// Recompute and persist the current phase, returning it.
    ///
    /// Safe to call from any read path; nothing is written when the phase
    /// and deadline are already current.
    pub async fn get_phase(&self, artwork_id: AuctionId) -> MarketResult<AuctionPhase> {
        let now = self.clock.now_unix();
        let _guard = self.lock_auction(artwork_id).await?;
        Ok(self.refresh_locked(artwork_id, now).await?.phase)
    }

    /// Snapshot of an artwork as stored, without a phase refresh.
    pub async fn get_artwork(&self, artwork_id: AuctionId) -> MarketResult<Artwork> {
        self.load(artwork_id).await
    }

    /// All bids on an auction, in admission order.
    pub async fn bids_for(&self, artwork_id: AuctionId) -> MarketResult<Vec<Bid>> {
        self.ledger.bids_for(artwork_id).await
    }

    /// All registrations for an auction, in sign-up order.
    pub async fn registrations_for(&self, artwork_id: AuctionId) -> MarketResult<Vec<Registration>> {
        self.store.registrations_for(artwork_id).await
    }

    /// Acquire the per-auction lock, waiting at most `config.lock_wait`.
    ///
    /// Contenders that miss the window get `MarketError::Contention` and
    /// retry at the request layer; nothing here blocks indefinitely.
    async fn lock_auction(&self, artwork_id: AuctionId) -> MarketResult<OwnedMutexGuard<()>> {
        let cell = {
            let mut locks = self.locks.lock();
            locks
                .entry(artwork_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        tokio::time::timeout(self.config.lock_wait, cell.lock_owned())
            .await
            .map_err(|_| MarketError::Contention)
    }

    async fn load(&self, artwork_id: AuctionId) -> MarketResult<Artwork> {
        self.store
            .load_artwork(artwork_id)
            .await?
            .ok_or(MarketError::NotFound(artwork_id))
    }

    /// Load and bring the phase up to date. Caller must hold the lock.
    async fn refresh_locked(&self, artwork_id: AuctionId, now: u64) -> MarketResult<Artwork> {
        let mut artwork = self.load(artwork_id).await?;
        if let Some(update) = lifecycle::advance(&artwork, now) {
            debug!(
                "artwork {}: phase {:?} -> {:?}",
                artwork_id, artwork.phase, update.phase
            );
            artwork.phase = update.phase;
            artwork.signup_deadline = update.signup_deadline;
            artwork.updated_at = now;
            self.store.save_artwork(&artwork).await?;
        }
        Ok(artwork)
    }
}
