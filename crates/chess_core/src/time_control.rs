//! Per-turn time budgeting.
//!
//! A `TimeControl` is created when a turn starts and polled by the search.
//! It never interrupts anything itself: the search checks `is_exhausted()`
//! between moves and unwinds on its own.

use std::time::{Duration, Instant};

/// Search limits handed to an engine for one turn.
///
/// `move_time` takes priority over `remaining`. With neither set, only
/// `depth` bounds the search.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies (half-moves)
    pub depth: u8,
    /// Fixed time allowed for this move
    pub move_time: Option<Duration>,
    /// Time left on the mover's clock; the engine spends a fraction of it
    pub remaining: Option<Duration>,
}

impl SearchLimits {
    /// Create limits with only depth constraint (no time limit).
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            remaining: None,
        }
    }

    /// Create limits with both depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            remaining: None,
        }
    }

    /// Create limits with only time constraint (infinite depth).
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: u8::MAX,
            move_time: Some(move_time),
            remaining: None,
        }
    }

    /// Spend a share of the game clock rather than a fixed amount.
    pub fn clock(remaining: Duration) -> Self {
        Self {
            depth: u8::MAX,
            move_time: None,
            remaining: Some(remaining),
        }
    }

    /// Build the turn's timer. `divisor` is how many turns the remaining
    /// clock is split across.
    pub fn time_control(&self, divisor: u32) -> TimeControl {
        match (self.move_time, self.remaining) {
            (Some(fixed), _) => TimeControl::fixed(fixed),
            (None, Some(remaining)) => TimeControl::from_clock(remaining, divisor),
            (None, None) => TimeControl::infinite(),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Wall-clock budget for a single turn.
#[derive(Debug, Clone)]
pub struct TimeControl {
    start_time: Instant,
    /// None = never expires
    allotment: Option<Duration>,
}

impl TimeControl {
    /// Budget of `remaining / divisor`; a zero divisor is treated as one.
    pub fn from_clock(remaining: Duration, divisor: u32) -> Self {
        Self {
            start_time: Instant::now(),
            allotment: Some(remaining / divisor.max(1)),
        }
    }

    pub fn fixed(move_time: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            allotment: Some(move_time),
        }
    }

    pub fn infinite() -> Self {
        Self {
            start_time: Instant::now(),
            allotment: None,
        }
    }

    /// Restart the clock. Call this when search begins.
    pub fn start(&mut self) {
        self.start_time = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn allotment(&self) -> Option<Duration> {
        self.allotment
    }

    /// True once `elapsed() >= allotment()`.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        match self.allotment {
            Some(limit) => self.elapsed() >= limit,
            None => false,
        }
    }

    /// Get remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.allotment?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::infinite()
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
