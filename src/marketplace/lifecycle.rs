//! Pure lifecycle state machine for auction phases.
//!
//! [`advance`] computes, from an artwork's persisted fields and the current
//! time, the phase it should be in right now plus the recomputed sign-up
//! deadline. It never touches storage; callers persist the returned update
//! (if any) themselves, which keeps the refresh idempotent and testable.

use crate::marketplace::artwork::{signup_deadline_for, Artwork, AuctionPhase};

/// Minimal set of fields changed by a status refresh.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PhaseUpdate {
    pub phase: AuctionPhase,
    pub signup_deadline: Option<u64>,
}

/// Compute the phase an artwork should be in at `now`.
///
/// Returns `None` when nothing changed. Rules:
/// - `Concluded` is sticky; only reconfiguration leaves it.
/// - A disabled auction is `NotConfigured`.
/// - Missing required configuration means `Draft`, but never regresses a
///   phase that already reached `SignupOpen` (that is a configuration
///   error, not a time transition).
/// - Otherwise time drives `Configured` → `SignupOpen` → `AwaitingStart`
///   → `Live`, skipping phases whose windows have already passed. Sign-up
///   opens immediately on valid configuration.
/// - `Live` is terminal here; only the finalizer exits it.
pub fn advance(artwork: &Artwork, now: u64) -> Option<PhaseUpdate> {
    use AuctionPhase::*;

    if artwork.phase == Concluded {
        return None;
    }

    if !artwork.for_auction {
        let update = PhaseUpdate {
            phase: NotConfigured,
            signup_deadline: None,
        };
        return (artwork.phase != NotConfigured || artwork.signup_deadline.is_some())
            .then_some(update);
    }

    let deadline = artwork
        .start_time
        .map(|start| signup_deadline_for(start, artwork.signup_offset_minutes));

    let phase = match (artwork.start_time, deadline) {
        (Some(start), Some(signup_deadline)) if artwork.auction_configured() => {
            match artwork.phase {
                NotConfigured | Draft | Configured => {
                    if now < signup_deadline {
                        SignupOpen
                    } else if now < start {
                        AwaitingStart
                    } else {
                        Live
                    }
                }
                SignupOpen => {
                    if now >= start {
                        Live
                    } else if now >= signup_deadline {
                        AwaitingStart
                    } else {
                        SignupOpen
                    }
                }
                AwaitingStart => {
                    if now >= start {
                        Live
                    } else {
                        AwaitingStart
                    }
                }
                Live => Live,
                Concluded => Concluded,
            }
        }
        _ => {
            if artwork.phase >= SignupOpen {
                artwork.phase
            } else {
                Draft
            }
        }
    };

    (phase != artwork.phase || deadline != artwork.signup_deadline).then_some(PhaseUpdate {
        phase,
        signup_deadline: deadline,
    })
}
