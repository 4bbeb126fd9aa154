//! Monotonic pacing timer.
//!
//! [`Timer`] measures time since a reference instant and can block the
//! calling thread until a minimum delay has elapsed. It never resets itself;
//! the playback loop resets it explicitly once per tick.

use std::{
    thread,
    time::{Duration, Instant},
};

/// Elapsed-time measurement against a resettable reference point.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use framescrub::Timer;
///
/// let mut timer = Timer::new();
/// timer.sleep_at_least(Duration::from_millis(2));
/// assert!(timer.elapsed() >= Duration::from_millis(2));
/// timer.reset();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    reference: Instant,
}

impl Timer {
    /// Create a timer whose reference point is now.
    pub fn new() -> Self {
        Self {
            reference: Instant::now(),
        }
    }

    /// Record now as the new reference point.
    pub fn reset(&mut self) {
        self.reference = Instant::now();
    }

    /// Time since the reference point. Does not reset.
    pub fn elapsed(&self) -> Duration {
        self.reference.elapsed()
    }

    /// Block until at least `delay` has passed since the reference point.
    ///
    /// Returns immediately when that much time has already elapsed.
    pub fn sleep_at_least(&self, delay: Duration) {
        let deadline = self.reference + delay;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            thread::sleep(deadline - now);
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
