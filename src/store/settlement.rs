use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::MarketResult;
use crate::marketplace::{AuctionId, SaleKind, SettlementTransaction, UserId};
use crate::traits::SettlementGateway;

type TransactionKey = (AuctionId, UserId, SaleKind);
type TransactionMap = Arc<RwLock<HashMap<TransactionKey, SettlementTransaction>>>;

/// In-memory settlement gateway with create-if-absent semantics.
#[derive(Clone, Default)]
pub struct MemorySettlementGateway {
    transactions: TransactionMap,
}

impl MemorySettlementGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// All transactions created so far, for inspection in tests.
    pub async fn transactions(&self) -> Vec<SettlementTransaction> {
        self.transactions.read().await.values().cloned().collect()
    }

    pub async fn transaction_count(&self) -> usize {
        self.transactions.read().await.len()
    }
}

#[async_trait]
impl SettlementGateway for MemorySettlementGateway {
    async fn create_or_get(
        &self,
        artwork: AuctionId,
        buyer: UserId,
        seller: UserId,
        amount: u64,
        kind: SaleKind,
        now: u64,
    ) -> MarketResult<(SettlementTransaction, bool)> {
        let mut transactions = self.transactions.write().await;
        if let Some(existing) = transactions.get(&(artwork, buyer, kind)) {
            return Ok((existing.clone(), false));
        }
        let transaction =
            SettlementTransaction::pending(artwork, buyer, seller, amount, kind, now);
        transactions.insert((artwork, buyer, kind), transaction.clone());
        Ok((transaction, true))
    }
}
