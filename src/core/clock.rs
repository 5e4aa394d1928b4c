//! Elapsed-time bookkeeping for a game.
//!
//! The clock never owns a timer thread. The presentation layer drives it by
//! calling [`GameClock::tick`] once per second; the clock only counts and
//! reports when a scoring interval has elapsed. `stop` is idempotent and is
//! safe to call in any state.

use serde::{Deserialize, Serialize};

/// Seconds between time-penalty scoring ticks.
pub const SCORING_INTERVAL_SECS: u64 = 10;

/// Game clock state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    elapsed: u64,
    running: bool,
    cancelled: bool,
}

impl GameClock {
    /// A stopped clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting. No-op if already running or cancelled.
    pub fn start(&mut self) {
        if self.running || self.cancelled {
            return;
        }
        self.running = true;
        self.elapsed = 0;
    }

    /// Advance one second.
    ///
    /// Returns true when the new elapsed time lands on a scoring interval.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += 1;
        self.elapsed % SCORING_INTERVAL_SECS == 0
    }

    /// Cancel the clock. Further `start` calls are ignored.
    pub fn stop(&mut self) {
        self.cancelled = true;
        self.running = false;
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
