//! Smoothed frame-rate measurement.
//!
//! [`FrameRateEstimator`] keeps the last K instantaneous rates in a ring
//! buffer and reports their arithmetic mean. Slots that have not been written
//! yet count as zero, so the estimate ramps up over the first K ticks.

use std::time::Duration;

use crate::error::PlayerError;

/// Number of samples averaged when no window size is configured.
pub const DEFAULT_RATE_WINDOW: usize = 10;

/// Rolling average of instantaneous frame rate.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use framescrub::FrameRateEstimator;
///
/// let mut estimator = FrameRateEstimator::new(4)?;
/// for _ in 0..4 {
///     estimator.update(Duration::from_millis(40))?;
/// }
/// assert!((estimator.rate() - 25.0).abs() < 1e-9);
/// # Ok::<(), framescrub::PlayerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FrameRateEstimator {
    samples: Vec<f64>,
    next_slot: usize,
    mean: f64,
}

impl FrameRateEstimator {
    /// Create an estimator averaging over `window` samples.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::InvalidInterval`] if `window` is zero.
    pub fn new(window: usize) -> Result<Self, PlayerError> {
        if window == 0 {
            return Err(PlayerError::InvalidInterval);
        }
        Ok(Self {
            samples: vec![0.0; window],
            next_slot: 0,
            mean: 0.0,
        })
    }

    /// Record the rate implied by `interval` and return the new mean.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::InvalidInterval`] if `interval` is zero. The
    /// window is left untouched in that case.
    pub fn update(&mut self, interval: Duration) -> Result<f64, PlayerError> {
        if interval.is_zero() {
            return Err(PlayerError::InvalidInterval);
        }

        let slot = self.next_slot;
        self.samples[slot] = 1.0 / interval.as_secs_f64();
        self.next_slot = (slot + 1) % self.samples.len();
        self.mean = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        Ok(self.mean)
    }

    /// The mean computed by the most recent [`update`](Self::update).
    pub fn rate(&self) -> f64 {
        self.mean
    }

    /// Number of slots in the window.
    pub fn window(&self) -> usize {
        self.samples.len()
    }

    /// Zero every slot.
    pub fn reset(&mut self) {
        self.samples.fill(0.0);
        self.next_slot = 0;
        self.mean = 0.0;
    }
}

impl Default for FrameRateEstimator {
    fn default() -> Self {
        Self {
            samples: vec![0.0; DEFAULT_RATE_WINDOW],
            next_slot: 0,
            mean: 0.0,
        }
    }
}
