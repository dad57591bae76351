//! The registration gate: sign-up requests and owner review, gating
//! bidding eligibility.

use tracing::info;

use crate::error::{MarketError, MarketResult};
use crate::marketplace::{AuctionId, AuctionPhase, Registration, ReviewDecision, UserId};
use crate::traits::{BidLedger, Clock, MarketStore, SettlementGateway};

use super::AuctionEngine;

impl<S, L, X, C> AuctionEngine<S, L, X, C>
where
    S: MarketStore,
    L: BidLedger,
    X: SettlementGateway,
    C: Clock + Clone + 'static,
{
    /// Request to join an auction during its sign-up window.
    ///
    /// Succeeds at most once per (auction, user); the result starts
    /// `Pending` until the owner reviews it.
    pub async fn register_for_auction(
        &self,
        artwork_id: AuctionId,
        user: UserId,
    ) -> MarketResult<Registration> {
        let now = self.clock.now_unix();
        let _guard = self.lock_auction(artwork_id).await?;
        let artwork = self.refresh_locked(artwork_id, now).await?;

        if user == artwork.owner {
            return Err(MarketError::SelfRegistration);
        }
        if artwork.phase != AuctionPhase::SignupOpen {
            return Err(MarketError::SignupClosed);
        }
        // The phase check should already guarantee this; re-check the
        // deadline so a stale stored phase can never extend the window.
        match artwork.signup_deadline {
            Some(deadline) if now < deadline => {}
            _ => return Err(MarketError::SignupClosed),
        }

        let registration = Registration::new(artwork_id, user, now);
        if !self
            .store
            .try_insert_registration(registration.clone())
            .await?
        {
            return Err(MarketError::DuplicateRegistration);
        }
        info!("artwork {}: {} registered for auction", artwork_id, user);
        Ok(registration)
    }

    /// Owner verdict on a sign-up. Allowed until the auction concludes,
    /// including after the sign-up window has closed (late review).
    pub async fn review_registration(
        &self,
        artwork_id: AuctionId,
        applicant: UserId,
        decision: ReviewDecision,
        reviewer: UserId,
    ) -> MarketResult<Registration> {
        let now = self.clock.now_unix();
        let _guard = self.lock_auction(artwork_id).await?;
        let artwork = self.refresh_locked(artwork_id, now).await?;

        if reviewer != artwork.owner {
            return Err(MarketError::NotOwner);
        }
        if artwork.phase == AuctionPhase::Concluded {
            return Err(MarketError::AlreadyConcluded);
        }

        let mut registration = self
            .store
            .registration(artwork_id, applicant)
            .await?
            .ok_or(MarketError::RegistrationNotFound)?;
        registration.review(decision, now);
        self.store.save_registration(&registration).await?;
        info!(
            "artwork {}: registration of {} reviewed: {:?}",
            artwork_id, applicant, registration.status
        );
        Ok(registration)
    }
}
