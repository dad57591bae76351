use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::config::DEFAULT_SIGNUP_OFFSET_MINUTES;

/// Identifier of an artwork (and of the auction attached to it).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuctionId(Uuid);

impl AuctionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AuctionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a marketplace user.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle phase of an artwork's auction.
///
/// The derived ordering follows the forward lifecycle; phases only move
/// backward through owner cancellation or full reconfiguration.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub enum AuctionPhase {
    /// No sale mode configured (or auction disabled/cancelled).
    NotConfigured,
    /// Auction enabled but required times or minimum bid are missing.
    Draft,
    /// Fully configured; transient, advanced immediately on refresh.
    Configured,
    /// Accepting registrations until the sign-up deadline.
    SignupOpen,
    /// Sign-up closed, waiting for the start time.
    AwaitingStart,
    /// Bidding is open. Only the finalizer exits this phase.
    Live,
    /// Finalized. Sticky; cleared only by full reconfiguration.
    Concluded,
}

/// How a concluded auction ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AuctionOutcome {
    /// A winner was declared and a settlement transaction exists.
    WinnerPendingSettlement,
    /// The auction expired without a valid winning bid.
    NoBids,
    /// A winner was determined but the settlement collaborator failed.
    SettlementFailed,
}

/// Owner-supplied auction configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AuctionTerms {
    /// Unix time at which bidding begins.
    pub start_time: u64,
    /// Scheduled end; can be pushed out by soft-close extensions.
    pub scheduled_end_time: u64,
    /// Minimum acceptable first bid, in minor currency units.
    pub minimum_bid: u64,
    /// Sign-up closes this many minutes before `start_time`.
    pub signup_offset_minutes: u64,
}

/// When the sign-up window closes for an auction starting at `start_time`.
pub fn signup_deadline_for(start_time: u64, offset_minutes: u64) -> u64 {
    start_time.saturating_sub(offset_minutes * 60)
}

/// One sellable artwork and the full state of its sale.
///
/// Amounts are minor currency units. At most one of direct sale and
/// auction is enabled at a time; enabling one clears the other.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Artwork {
    pub id: AuctionId,
    pub owner: UserId,
    pub title: String,

    // Direct sale
    pub for_direct_sale: bool,
    pub direct_sale_price: Option<u64>,

    // Auction configuration
    pub for_auction: bool,
    pub start_time: Option<u64>,
    pub scheduled_end_time: Option<u64>,
    pub minimum_bid: Option<u64>,
    pub signup_offset_minutes: u64,
    /// Derived: `start_time - signup_offset`. Recomputed on every refresh.
    pub signup_deadline: Option<u64>,

    pub phase: AuctionPhase,

    // Denormalized bidding cache; must always match the ledger maximum.
    pub current_highest_bid: Option<u64>,
    pub current_highest_bidder: Option<UserId>,
    pub last_bid_time: Option<u64>,

    // Outcome record, kept after conclusion.
    pub winner: Option<UserId>,
    pub winning_price: Option<u64>,
    pub outcome: Option<AuctionOutcome>,

    pub created_at: u64,
    pub updated_at: u64,
}

impl Artwork {
    pub fn new(owner: UserId, title: impl Into<String>, now: u64) -> Self {
        Self {
            id: AuctionId::new(),
            owner,
            title: title.into(),
            for_direct_sale: false,
            direct_sale_price: None,
            for_auction: false,
            start_time: None,
            scheduled_end_time: None,
            minimum_bid: None,
            signup_offset_minutes: DEFAULT_SIGNUP_OFFSET_MINUTES,
            signup_deadline: None,
            phase: AuctionPhase::NotConfigured,
            current_highest_bid: None,
            current_highest_bidder: None,
            last_bid_time: None,
            winner: None,
            winning_price: None,
            outcome: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether every field required to run the auction is present.
    pub fn auction_configured(&self) -> bool {
        self.for_auction
            && self.start_time.is_some()
            && self.scheduled_end_time.is_some()
            && self.minimum_bid.is_some()
    }

    /// Enable the auction with the given terms, clearing direct sale and
    /// any previous run's outcome. Phase resets to `Configured`; callers
    /// advance it immediately afterwards.
    pub fn apply_auction_terms(&mut self, terms: AuctionTerms, now: u64) {
        self.for_direct_sale = false;
        self.direct_sale_price = None;

        self.for_auction = true;
        self.start_time = Some(terms.start_time);
        self.scheduled_end_time = Some(terms.scheduled_end_time);
        self.minimum_bid = Some(terms.minimum_bid);
        self.signup_offset_minutes = terms.signup_offset_minutes;
        self.signup_deadline = Some(signup_deadline_for(
            terms.start_time,
            terms.signup_offset_minutes,
        ));

        self.clear_runtime_fields();
        self.winner = None;
        self.winning_price = None;
        self.outcome = None;

        self.phase = AuctionPhase::Configured;
        self.updated_at = now;
    }

    /// Enable direct sale, disabling the auction entirely.
    pub fn apply_direct_sale(&mut self, price: u64, now: u64) {
        self.disable_auction(now);
        self.for_direct_sale = true;
        self.direct_sale_price = Some(price);
        self.updated_at = now;
    }

    /// Disable the auction and reset to `NotConfigured`.
    ///
    /// The only backward transition: owner cancellation or switching the
    /// artwork to direct sale. Clears configuration, runtime fields, and
    /// any recorded outcome.
    pub fn disable_auction(&mut self, now: u64) {
        self.for_auction = false;
        self.start_time = None;
        self.scheduled_end_time = None;
        self.minimum_bid = None;
        self.signup_deadline = None;
        self.clear_runtime_fields();
        self.winner = None;
        self.winning_price = None;
        self.outcome = None;
        self.phase = AuctionPhase::NotConfigured;
        self.updated_at = now;
    }

    /// Record an admitted bid in the denormalized cache and apply the
    /// soft-close rule. Returns the (possibly extended) deadline.
    ///
    /// Only call with the per-auction lock held and the bid already
    /// appended to the ledger.
    pub fn record_bid(&mut self, bidder: UserId, amount: u64, now: u64, extension_secs: u64) -> u64 {
        self.current_highest_bid = Some(amount);
        self.current_highest_bidder = Some(bidder);
        self.last_bid_time = Some(now);

        let extended = now + extension_secs;
        let deadline = match self.scheduled_end_time {
            Some(end) if extended > end => {
                self.scheduled_end_time = Some(extended);
                extended
            }
            Some(end) => end,
            // Unreachable for a Live auction; keep the math total anyway.
            None => {
                self.scheduled_end_time = Some(extended);
                extended
            }
        };
        self.updated_at = now;
        deadline
    }

    /// Drive the auction to its terminal phase and record the outcome.
    ///
    /// The sale mode is switched off and runtime bidding fields are
    /// cleared; `winner`/`winning_price` survive as the historical record.
    pub fn conclude(
        &mut self,
        outcome: AuctionOutcome,
        winner: Option<(UserId, u64)>,
        now: u64,
    ) {
        self.for_auction = false;
        self.clear_runtime_fields();
        self.outcome = Some(outcome);
        self.winner = winner.map(|(user, _)| user);
        self.winning_price = winner.map(|(_, price)| price);
        self.phase = AuctionPhase::Concluded;
        self.updated_at = now;
    }

    fn clear_runtime_fields(&mut self) {
        self.current_highest_bid = None;
        self.current_highest_bidder = None;
        self.last_bid_time = None;
    }
}
