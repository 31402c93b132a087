// er301-rs/er301/src/utils/timeout.rs

//! Deadline helper for the bounded poll loops.

use std::thread;
use std::time::{Duration, Instant};

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Sleep unless `d` is zero. Tests run with zero poll intervals.
pub fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}

/// A fixed point in time after which a wait gives up.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    /// Deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// True once the budget is used up
    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.budget
    }

    /// Milliseconds since the deadline was set
    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
