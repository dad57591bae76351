use serde::{Deserialize, Serialize};

use crate::marketplace::artwork::{AuctionId, UserId};

/// An immutable bid record.
///
/// Bids are never updated or deleted. `seq` is assigned by the ledger in
/// append order, per auction, and serves as the final tie-breaker so that
/// winner determination is deterministic even on replayed data.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub artwork: AuctionId,
    pub bidder: UserId,
    /// Amount in minor currency units.
    pub amount: u64,
    /// Unix timestamp at admission.
    pub timestamp: u64,
    /// Per-auction append sequence number.
    pub seq: u64,
}

impl Bid {
    /// Winning-order key: amount first, then recency, then append order.
    ///
    /// Maximizing this key yields the winner; a later bid beats an earlier
    /// one at equal amount. Admission control rejects equal amounts, so
    /// the tie legs only matter for audit/replay of raw ledgers.
    pub fn winning_order_key(&self) -> (u64, u64, u64) {
        (self.amount, self.timestamp, self.seq)
    }
}

/// The winning bid among `bids`, by [`Bid::winning_order_key`].
pub fn highest_of<'a, I>(bids: I) -> Option<&'a Bid>
where
    I: IntoIterator<Item = &'a Bid>,
{
    bids.into_iter().max_by_key(|bid| bid.winning_order_key())
}
