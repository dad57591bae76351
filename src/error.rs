use crate::marketplace::AuctionId;

/// Domain-specific error types for the marketplace core.
///
/// Rejections the hosting application shows to a user (wrong phase,
/// too-low bid, duplicate sign-up) are their own variants so callers can
/// branch on them without string matching.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("artwork not found: {0}")]
    NotFound(AuctionId),

    #[error("no registration on record for this user and auction")]
    RegistrationNotFound,

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("bidding is not open on this artwork")]
    NotLive,

    #[error("bidder is not an approved registrant for this auction")]
    NotEligible,

    #[error("bid of {offered} does not beat the current reference of {reference}")]
    TooLow { offered: u64, reference: u64 },

    #[error("the sign-up window is not open")]
    SignupClosed,

    #[error("already registered for this auction")]
    DuplicateRegistration,

    #[error("owners cannot register for their own auction")]
    SelfRegistration,

    #[error("only the artwork owner may perform this action")]
    NotOwner,

    #[error("auction already concluded")]
    AlreadyConcluded,

    #[error("artwork is not offered for direct sale")]
    NotDirectSale,

    #[error("owners cannot purchase their own artwork")]
    OwnPurchase,

    #[error("artwork is busy, retry the operation")]
    Contention,

    #[error("settlement failed: {0}")]
    Settlement(String),

    #[error("storage operation failed: {0}")]
    Storage(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias.
pub type MarketResult<T> = Result<T, MarketError>;
