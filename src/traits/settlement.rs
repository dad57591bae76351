//! Settlement collaborator abstraction.

use async_trait::async_trait;

use crate::error::MarketResult;
use crate::marketplace::{AuctionId, SaleKind, SettlementTransaction, UserId};

/// External settlement subsystem, reduced to a single idempotent operation.
///
/// Payment processing, receipt upload, and admin approval all live outside
/// the core; the engine only needs "make sure exactly one pending
/// transaction exists for this sale".
#[async_trait]
pub trait SettlementGateway: Clone + Send + Sync + 'static {
    /// Create a pending transaction keyed on `(artwork, buyer, kind)`, or
    /// return the existing one unchanged.
    ///
    /// The boolean is `true` when the transaction was created by this call.
    async fn create_or_get(
        &self,
        artwork: AuctionId,
        buyer: UserId,
        seller: UserId,
        amount: u64,
        kind: SaleKind,
        now: u64,
    ) -> MarketResult<(SettlementTransaction, bool)>;
}
