use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::MarketResult;
use crate::marketplace::{bid::highest_of, AuctionId, Bid, UserId};
use crate::traits::BidLedger;

type LedgerMap = Arc<RwLock<HashMap<AuctionId, Vec<Bid>>>>;

/// In-memory append-only bid ledger.
///
/// Appends push onto a per-auction vector, so `seq` doubles as the index
/// into it. Reads never block appends on other auctions.
#[derive(Clone, Default)]
pub struct MemoryBidLedger {
    bids: LedgerMap,
}

impl MemoryBidLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BidLedger for MemoryBidLedger {
    async fn append(
        &self,
        artwork: AuctionId,
        bidder: UserId,
        amount: u64,
        now: u64,
    ) -> MarketResult<Bid> {
        let mut ledger = self.bids.write().await;
        let entries = ledger.entry(artwork).or_default();
        let bid = Bid {
            artwork,
            bidder,
            amount,
            timestamp: now,
            seq: entries.len() as u64,
        };
        entries.push(bid);
        Ok(bid)
    }

    async fn highest(&self, artwork: AuctionId) -> MarketResult<Option<Bid>> {
        let ledger = self.bids.read().await;
        Ok(ledger
            .get(&artwork)
            .and_then(|entries| highest_of(entries))
            .copied())
    }

    async fn bids_for(&self, artwork: AuctionId) -> MarketResult<Vec<Bid>> {
        let ledger = self.bids.read().await;
        Ok(ledger.get(&artwork).cloned().unwrap_or_default())
    }
}
