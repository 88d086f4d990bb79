//! Time management utilities
//!
//! All engine timestamps are milliseconds on a host-defined monotonic
//! timeline, the same unit a display-refresh callback hands out.

use std::cell::Cell;
use std::time::Instant;

/// Source of the current time in milliseconds
pub trait Clock {
    /// Milliseconds since the clock's origin
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`Instant`]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Manually advanced clock for headless hosts and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Create a clock starting at `start_ms`
    pub fn starting_at(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Frame cadence tracker fed with the timestamps of each tick
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_frame: Option<f64>,
    delta_ms: f64,
    total_ms: f64,
    frame_count: u64,
}

impl FrameClock {
    /// Create a new frame clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tick at `now_ms` (should be called once per frame)
    pub fn tick(&mut self, now_ms: f64) {
        if let Some(last) = self.last_frame {
            self.delta_ms = (now_ms - last).max(0.0);
            self.total_ms += self.delta_ms;
        }
        self.last_frame = Some(now_ms);
        self.frame_count += 1;
    }

    /// Time between the last two ticks
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Total time covered by recorded ticks
    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// Number of recorded ticks
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since the first tick
    pub fn average_fps(&self) -> f64 {
        if self.total_ms > 0.0 {
            (self.frame_count.saturating_sub(1)) as f64 * 1000.0 / self.total_ms
        } else {
            0.0
        }
    }
}
