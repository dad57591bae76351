//! Bid admission control: validates and admits bids under the per-auction
//! critical section, keeping the denormalized highest-bid cache in sync
//! with the ledger and applying the soft-close rule.

use tracing::info;

use crate::error::{MarketError, MarketResult};
use crate::marketplace::{AuctionId, AuctionPhase, Bid, UserId};
use crate::traits::{BidLedger, Clock, MarketStore, SettlementGateway};

use super::AuctionEngine;

/// Result of a successful bid admission.
#[derive(Clone, Copy, Debug)]
pub struct BidAdmission {
    /// The ledger record created for this bid.
    pub bid: Bid,
    /// Effective auction end after any soft-close extension, for display.
    pub new_deadline: u64,
}

impl<S, L, X, C> AuctionEngine<S, L, X, C>
where
    S: MarketStore,
    L: BidLedger,
    X: SettlementGateway,
    C: Clock + Clone + 'static,
{
    /// Admit a bid against a live auction.
    ///
    /// Serializable per auction: no two concurrent admissions can both
    /// succeed against a stale view of the current highest bid, because
    /// the reference amount is read and the ledger appended under the same
    /// lock. Rejections leave no trace in storage.
    ///
    /// The first bid must be at least the minimum bid (equality admits);
    /// every later bid must strictly beat the current highest.
    pub async fn place_bid(
        &self,
        artwork_id: AuctionId,
        bidder: UserId,
        amount: u64,
    ) -> MarketResult<BidAdmission> {
        if amount == 0 {
            return Err(MarketError::Validation("bid amount must be positive".into()));
        }

        let now = self.clock.now_unix();
        let _guard = self.lock_auction(artwork_id).await?;
        let mut artwork = self.refresh_locked(artwork_id, now).await?;

        if artwork.phase != AuctionPhase::Live {
            return Err(MarketError::NotLive);
        }
        if bidder == artwork.owner {
            return Err(MarketError::NotEligible);
        }
        let approved = self
            .store
            .registration(artwork_id, bidder)
            .await?
            .is_some_and(|registration| registration.is_approved());
        if !approved {
            return Err(MarketError::NotEligible);
        }

        match self.ledger.highest(artwork_id).await? {
            // Later bids must strictly beat the standing highest.
            Some(highest) if amount <= highest.amount => {
                return Err(MarketError::TooLow {
                    offered: amount,
                    reference: highest.amount,
                });
            }
            Some(_) => {}
            // First bid: the minimum itself is an acceptable opening.
            None => {
                let minimum = artwork.minimum_bid.ok_or_else(|| {
                    MarketError::Validation("auction is live without a minimum bid".into())
                })?;
                if amount < minimum {
                    return Err(MarketError::TooLow {
                        offered: amount,
                        reference: minimum,
                    });
                }
            }
        }

        let bid = self.ledger.append(artwork_id, bidder, amount, now).await?;
        let new_deadline =
            artwork.record_bid(bidder, amount, now, self.config.soft_close_extension_secs);
        self.store.save_artwork(&artwork).await?;

        info!(
            "artwork {}: admitted bid of {} by {}, auction ends at {}",
            artwork_id, amount, bidder, new_deadline
        );
        Ok(BidAdmission { bid, new_deadline })
    }
}
