use serde::{Deserialize, Serialize};

use crate::marketplace::artwork::{AuctionId, UserId};

/// Review state of an auction sign-up.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

/// Owner verdict on a pending registration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// A user's sign-up for one auction.
///
/// Unique per (artwork, user); the store enforces the constraint via its
/// create-if-absent insert.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registration {
    pub artwork: AuctionId,
    pub user: UserId,
    pub status: RegistrationStatus,
    pub registered_at: u64,
    pub reviewed_at: Option<u64>,
}

impl Registration {
    pub fn new(artwork: AuctionId, user: UserId, now: u64) -> Self {
        Self {
            artwork,
            user,
            status: RegistrationStatus::Pending,
            registered_at: now,
            reviewed_at: None,
        }
    }

    /// Apply an owner decision, stamping the review time.
    pub fn review(&mut self, decision: ReviewDecision, now: u64) {
        self.status = match decision {
            ReviewDecision::Approve => RegistrationStatus::Approved,
            ReviewDecision::Reject => RegistrationStatus::Rejected,
        };
        self.reviewed_at = Some(now);
    }

    pub fn is_approved(&self) -> bool {
        self.status == RegistrationStatus::Approved
    }
}
