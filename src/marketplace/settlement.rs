use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::marketplace::artwork::{AuctionId, UserId};

/// Identifier of a settlement transaction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What kind of sale produced a transaction. Part of the idempotency key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SaleKind {
    DirectBuy,
    AuctionWin,
}

/// Where a transaction stands in the settlement subsystem.
///
/// Only `PendingPayment` is produced by this crate; the remaining states
/// belong to the external payment/approval flow and are modeled so the
/// hosting application can round-trip them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TransactionStatus {
    PendingPayment,
    PendingApproval,
    Approved,
    Rejected,
    Cancelled,
}

/// A settlement transaction linking buyer, seller, and price.
///
/// Owned by the settlement subsystem once created; the core only
/// guarantees at-most-one per (artwork, buyer, kind).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettlementTransaction {
    pub id: TransactionId,
    pub artwork: AuctionId,
    pub buyer: UserId,
    pub seller: UserId,
    pub kind: SaleKind,
    /// Minor currency units.
    pub final_price: u64,
    pub status: TransactionStatus,
    pub initiated_at: u64,
}

impl SettlementTransaction {
    pub fn pending(
        artwork: AuctionId,
        buyer: UserId,
        seller: UserId,
        amount: u64,
        kind: SaleKind,
        now: u64,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            artwork,
            buyer,
            seller,
            kind,
            final_price: amount,
            status: TransactionStatus::PendingPayment,
            initiated_at: now,
        }
    }
}
