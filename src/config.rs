//! Configuration constants and engine tunables.
//!
//! This module centralizes magic numbers and configuration values
//! to improve maintainability and enable easier tuning.

use std::time::Duration;

/// Soft-close extension window in seconds.
///
/// A bid landing within this many seconds of the scheduled end pushes the
/// end out to `bid_time + SOFT_CLOSE_EXTENSION_SECS`, so an auction cannot
/// end while a bidder is actively contesting it.
pub const SOFT_CLOSE_EXTENSION_SECS: u64 = 30;

/// Maximum time to wait for a per-auction lock before failing fast
/// with `MarketError::Contention`.
pub const LOCK_WAIT_MS: u64 = 250;

/// Default sign-up offset: registration closes this many minutes before
/// the auction start time.
pub const DEFAULT_SIGNUP_OFFSET_MINUTES: u64 = 30;

/// Engine tunables with sensible defaults.
///
/// The soft-close window is deliberately a single configurable value;
/// earlier revisions of the product flip-flopped between 30 seconds and
/// 3 minutes, and encoding both was worse than either.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Seconds added past `now` when a bid lands near the deadline.
    pub soft_close_extension_secs: u64,
    /// Bound on per-auction lock acquisition.
    pub lock_wait: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            soft_close_extension_secs: SOFT_CLOSE_EXTENSION_SECS,
            lock_wait: Duration::from_millis(LOCK_WAIT_MS),
        }
    }
}

/// Return the current Unix timestamp in seconds.
///
/// Convenience wrapper for callers outside the engine; engine code always
/// goes through an injected [`crate::traits::Clock`] instead.
pub fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
