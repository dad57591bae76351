//! Finalization: the one-time transition from live bidding to a settled
//! outcome, idempotent under concurrent callers.

use tracing::{info, warn};

use crate::error::MarketResult;
use crate::marketplace::{
    AuctionId, AuctionOutcome, AuctionPhase, SaleKind, SettlementTransaction, UserId,
};
use crate::traits::{BidLedger, Clock, MarketStore, SettlementGateway};

use super::AuctionEngine;

/// Why an expired auction concluded without a sale.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoSaleReason {
    /// The ledger was empty.
    NoBidsPlaced,
    /// Bids existed but none reached the minimum bid.
    ReserveNotMet,
}

/// Terminal result of a finalization attempt.
#[derive(Clone, Debug)]
pub enum FinalizeOutcome {
    /// A winner was declared and exactly one settlement transaction exists.
    WinnerFound {
        bidder: UserId,
        amount: u64,
        transaction: SettlementTransaction,
    },
    /// The auction expired without a valid winning bid.
    NoBids { reason: NoSaleReason },
    /// Nothing to do: not live, or the deadline has not passed yet.
    AlreadyConcluded,
    /// The settlement collaborator failed; the auction still concluded.
    TransactionError { detail: String },
}

impl<S, L, X, C> AuctionEngine<S, L, X, C>
where
    S: MarketStore,
    L: BidLedger,
    X: SettlementGateway,
    C: Clock + Clone + 'static,
{
    /// Finalize the auction if its effective end time has passed.
    ///
    /// Safe to call speculatively on every page load and from any number
    /// of concurrent callers: the phase re-check under the per-auction
    /// lock makes exactly one caller perform the transition, and the
    /// settlement gateway's create-if-absent keying makes the transaction
    /// unique even across process restarts.
    ///
    /// A settlement failure still drives the auction out of `Live`; the
    /// system must never wedge in a live phase after its time has passed.
    pub async fn finalize_if_due(&self, artwork_id: AuctionId) -> MarketResult<FinalizeOutcome> {
        let now = self.clock.now_unix();
        let _guard = self.lock_auction(artwork_id).await?;
        let mut artwork = self.refresh_locked(artwork_id, now).await?;

        let due = artwork.phase == AuctionPhase::Live
            && artwork.scheduled_end_time.is_some_and(|end| end <= now);
        if !due {
            return Ok(FinalizeOutcome::AlreadyConcluded);
        }

        let highest = self.ledger.highest(artwork_id).await?;
        let winning = highest
            .filter(|bid| artwork.minimum_bid.is_some_and(|minimum| bid.amount >= minimum));

        let Some(bid) = winning else {
            let reason = if highest.is_some() {
                NoSaleReason::ReserveNotMet
            } else {
                NoSaleReason::NoBidsPlaced
            };
            artwork.conclude(AuctionOutcome::NoBids, None, now);
            self.store.save_artwork(&artwork).await?;
            info!(
                "artwork {}: auction concluded without a sale ({:?})",
                artwork_id, reason
            );
            return Ok(FinalizeOutcome::NoBids { reason });
        };

        match self
            .settlement
            .create_or_get(
                artwork_id,
                bid.bidder,
                artwork.owner,
                bid.amount,
                SaleKind::AuctionWin,
                now,
            )
            .await
        {
            Ok((transaction, created)) => {
                artwork.conclude(
                    AuctionOutcome::WinnerPendingSettlement,
                    Some((bid.bidder, bid.amount)),
                    now,
                );
                self.store.save_artwork(&artwork).await?;
                info!(
                    "artwork {}: auction won by {} at {} (transaction {}, created: {})",
                    artwork_id, bid.bidder, bid.amount, transaction.id, created
                );
                Ok(FinalizeOutcome::WinnerFound {
                    bidder: bid.bidder,
                    amount: bid.amount,
                    transaction,
                })
            }
            Err(err) => {
                artwork.conclude(AuctionOutcome::SettlementFailed, None, now);
                self.store.save_artwork(&artwork).await?;
                warn!(
                    "artwork {}: settlement failed during finalization: {}",
                    artwork_id, err
                );
                Ok(FinalizeOutcome::TransactionError {
                    detail: err.to_string(),
                })
            }
        }
    }
}
