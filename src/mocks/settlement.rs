//! Settlement gateway with switchable failure injection.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{MarketError, MarketResult};
use crate::marketplace::{AuctionId, SaleKind, SettlementTransaction, UserId};
use crate::store::MemorySettlementGateway;
use crate::traits::SettlementGateway;

/// Wraps the in-memory gateway and fails on demand, for exercising the
/// finalizer's settlement-failure path.
#[derive(Clone, Default)]
pub struct FlakySettlementGateway {
    inner: MemorySettlementGateway,
    fail: Arc<AtomicBool>,
}

impl FlakySettlementGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `true`, every `create_or_get` fails until switched back.
    pub fn set_fail_mode(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub async fn transactions(&self) -> Vec<SettlementTransaction> {
        self.inner.transactions().await
    }

    pub async fn transaction_count(&self) -> usize {
        self.inner.transaction_count().await
    }
}

#[async_trait]
impl SettlementGateway for FlakySettlementGateway {
    async fn create_or_get(
        &self,
        artwork: AuctionId,
        buyer: UserId,
        seller: UserId,
        amount: u64,
        kind: SaleKind,
        now: u64,
    ) -> MarketResult<(SettlementTransaction, bool)> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MarketError::Settlement(
                "injected settlement failure".into(),
            ));
        }
        self.inner
            .create_or_get(artwork, buyer, seller, amount, kind, now)
            .await
    }
}
