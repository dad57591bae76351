//! Owner-facing configuration operations: creating artworks, switching
//! between sale modes, and cancelling an auction.

use tracing::info;

use crate::error::{MarketError, MarketResult};
use crate::marketplace::{
    lifecycle, Artwork, AuctionId, AuctionPhase, AuctionTerms, SaleKind, SettlementTransaction,
    UserId,
};
use crate::traits::{BidLedger, Clock, MarketStore, SettlementGateway};

use super::AuctionEngine;

impl<S, L, X, C> AuctionEngine<S, L, X, C>
where
    S: MarketStore,
    L: BidLedger,
    X: SettlementGateway,
    C: Clock + Clone + 'static,
{
    /// Create a new artwork with no sale mode configured.
    pub async fn create_artwork(
        &self,
        owner: UserId,
        title: impl Into<String> + Send,
    ) -> MarketResult<Artwork> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(MarketError::Validation("title must not be empty".into()));
        }
        let now = self.clock.now_unix();
        let artwork = Artwork::new(owner, title, now);
        self.store.insert_artwork(artwork.clone()).await?;
        info!("created artwork '{}' ({})", artwork.title, artwork.id);
        Ok(artwork)
    }

    /// Enable (or fully reconfigure) the auction on an artwork.
    ///
    /// Clears direct sale and any previous run's outcome, recomputes the
    /// sign-up deadline, and immediately advances the phase. Configuring
    /// an auction whose windows have already passed lands it straight in
    /// `AwaitingStart` or even `Live`.
    pub async fn configure_auction(
        &self,
        artwork_id: AuctionId,
        owner: UserId,
        terms: AuctionTerms,
    ) -> MarketResult<Artwork> {
        if terms.minimum_bid == 0 {
            return Err(MarketError::Validation(
                "minimum bid must be positive".into(),
            ));
        }
        if terms.scheduled_end_time <= terms.start_time {
            return Err(MarketError::Validation(
                "auction must end after it starts".into(),
            ));
        }

        let now = self.clock.now_unix();
        let _guard = self.lock_auction(artwork_id).await?;
        let mut artwork = self.load(artwork_id).await?;
        if artwork.owner != owner {
            return Err(MarketError::NotOwner);
        }

        artwork.apply_auction_terms(terms, now);
        if let Some(update) = lifecycle::advance(&artwork, now) {
            artwork.phase = update.phase;
            artwork.signup_deadline = update.signup_deadline;
        }
        self.store.save_artwork(&artwork).await?;
        info!(
            "artwork {}: auction configured, phase {:?}, signup closes at {:?}",
            artwork_id, artwork.phase, artwork.signup_deadline
        );
        Ok(artwork)
    }

    /// Offer the artwork for direct sale, disabling any auction.
    pub async fn configure_direct_sale(
        &self,
        artwork_id: AuctionId,
        owner: UserId,
        price: u64,
    ) -> MarketResult<Artwork> {
        if price == 0 {
            return Err(MarketError::Validation(
                "direct sale price must be positive".into(),
            ));
        }

        let now = self.clock.now_unix();
        let _guard = self.lock_auction(artwork_id).await?;
        let mut artwork = self.load(artwork_id).await?;
        if artwork.owner != owner {
            return Err(MarketError::NotOwner);
        }

        artwork.apply_direct_sale(price, now);
        self.store.save_artwork(&artwork).await?;
        info!(
            "artwork {}: direct sale configured at {}",
            artwork_id, price
        );
        Ok(artwork)
    }

    /// Cancel a not-yet-concluded auction, resetting to `NotConfigured`.
    ///
    /// The only owner-initiated backward transition. Ledger entries are
    /// kept (the ledger is append-only); the runtime cache and
    /// configuration are cleared.
    pub async fn cancel_auction(
        &self,
        artwork_id: AuctionId,
        owner: UserId,
    ) -> MarketResult<Artwork> {
        let now = self.clock.now_unix();
        let _guard = self.lock_auction(artwork_id).await?;
        let mut artwork = self.refresh_locked(artwork_id, now).await?;
        if artwork.owner != owner {
            return Err(MarketError::NotOwner);
        }
        if artwork.phase == AuctionPhase::Concluded {
            return Err(MarketError::AlreadyConcluded);
        }

        artwork.disable_auction(now);
        self.store.save_artwork(&artwork).await?;
        info!("artwork {}: auction cancelled by owner", artwork_id);
        Ok(artwork)
    }

    /// Start a direct purchase, creating (or returning) the pending
    /// settlement transaction for this buyer.
    pub async fn initiate_purchase(
        &self,
        artwork_id: AuctionId,
        buyer: UserId,
    ) -> MarketResult<(SettlementTransaction, bool)> {
        let now = self.clock.now_unix();
        let _guard = self.lock_auction(artwork_id).await?;
        let artwork = self.load(artwork_id).await?;

        let price = match artwork.direct_sale_price {
            Some(price) if artwork.for_direct_sale => price,
            _ => return Err(MarketError::NotDirectSale),
        };
        if buyer == artwork.owner {
            return Err(MarketError::OwnPurchase);
        }

        let (transaction, created) = self
            .settlement
            .create_or_get(
                artwork_id,
                buyer,
                artwork.owner,
                price,
                SaleKind::DirectBuy,
                now,
            )
            .await?;
        if created {
            info!(
                "artwork {}: direct purchase initiated by {} at {}",
                artwork_id, buyer, price
            );
        }
        Ok((transaction, created))
    }
}
