//! Fixed-rate frame clock.
//!
//! The driver advances at most once per tick. The clock itself does not read
//! wall time: callers pass the time elapsed since the last tick, so the
//! pacing logic stays testable.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SortError, SortResult};

/// Default animation rate, one driver tick per rendered frame.
pub const DEFAULT_RATE_HZ: u32 = 60;

/// Frame clock with a fixed tick period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameClock {
    /// Ticks per second.
    rate_hz: u32,
    /// Ticks taken so far.
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock ticking `rate_hz` times per second.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidConfiguration` if `rate_hz` is zero.
    pub fn from_rate(rate_hz: u32) -> SortResult<Self> {
        if rate_hz == 0 {
            return Err(SortError::invalid_config("frame rate must be positive"));
        }
        Ok(Self {
            rate_hz,
            frame_count: 0,
        })
    }

    /// Ticks per second.
    #[must_use]
    pub const fn rate_hz(&self) -> u32 {
        self.rate_hz
    }

    /// Duration of one tick.
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_secs(1) / self.rate_hz
    }

    /// Number of ticks taken.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check whether a tick is due after `since_last_tick`.
    #[must_use]
    pub fn is_due(&self, since_last_tick: Duration) -> bool {
        since_last_tick >= self.period()
    }

    /// Time left to wait for input before the next tick is due.
    #[must_use]
    pub fn remaining(&self, since_last_tick: Duration) -> Duration {
        self.period().saturating_sub(since_last_tick)
    }

    /// Record one tick and return the new frame count.
    #[allow(clippy::missing_const_for_fn)] // Mutable const not stable
    pub fn tick(&mut self) -> u64 {
        self.frame_count += 1;
        self.frame_count
    }

    /// Animation time covered by the ticks taken so far.
    #[must_use]
    pub fn animation_time(&self) -> Duration {
        self.period()
            .saturating_mul(u32::try_from(self.frame_count).unwrap_or(u32::MAX))
    }

    /// Reset the frame counter.
    #[allow(clippy::missing_const_for_fn)] // Mutable const not stable
    pub fn reset(&mut self) {
        self.frame_count = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            rate_hz: DEFAULT_RATE_HZ,
            frame_count: 0,
        }
    }
}
