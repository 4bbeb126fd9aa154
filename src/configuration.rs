//! Session configuration.
//!
//! [`PlayerOptions`] is a builder carrying window placement, capture
//! location, and loop tuning into [`PlaybackSession::new`]. Every field has a
//! default matching the classic player.
//!
//! [`PlaybackSession::new`]: crate::PlaybackSession::new
//!
//! # Example
//!
//! ```
//! use framescrub::{CancellationToken, PlayerOptions};
//!
//! let token = CancellationToken::new();
//! let options = PlayerOptions::new()
//!     .with_window_position(200, 40)
//!     .with_fixed_size(Some((1280, 720)))
//!     .with_capture_directory("captures")
//!     .with_cancellation(token.clone());
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use crate::{
    cancellation::CancellationToken, frame_rate::DEFAULT_RATE_WINDOW, render::WindowPlacement,
};

/// Default top-left corner of the playback window.
pub const DEFAULT_WINDOW_POSITION: (i32, i32) = (100, 10);

/// Options for a playback session.
#[derive(Clone)]
pub struct PlayerOptions {
    pub(crate) window_position: (i32, i32),
    pub(crate) fixed_size: Option<(u32, u32)>,
    pub(crate) capture_directory: PathBuf,
    pub(crate) rate_window: usize,
    pub(crate) poll_timeout_ms: u32,
    pub(crate) cancellation: Option<CancellationToken>,
}

impl Debug for PlayerOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PlayerOptions")
            .field("window_position", &self.window_position)
            .field("fixed_size", &self.fixed_size)
            .field("capture_directory", &self.capture_directory)
            .field("rate_window", &self.rate_window)
            .field("poll_timeout_ms", &self.poll_timeout_ms)
            .field("has_cancellation", &self.cancellation.is_some())
            .finish()
    }
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerOptions {
    /// Defaults: window at `(100, 10)`, sized to the video, captures in the
    /// working directory, a 10-sample rate window, 1 ms input polling.
    pub fn new() -> Self {
        Self {
            window_position: DEFAULT_WINDOW_POSITION,
            fixed_size: None,
            capture_directory: PathBuf::from("."),
            rate_window: DEFAULT_RATE_WINDOW,
            poll_timeout_ms: 1,
            cancellation: None,
        }
    }

    /// Place the window's top-left corner at `(x, y)`.
    #[must_use]
    pub fn with_window_position(mut self, x: i32, y: i32) -> Self {
        self.window_position = (x, y);
        self
    }

    /// Show frames at a fixed `(width, height)`, or at their own size with
    /// `None`.
    #[must_use]
    pub fn with_fixed_size(mut self, size: Option<(u32, u32)>) -> Self {
        self.fixed_size = size;
        self
    }

    /// Directory receiving `capNN.png` files.
    #[must_use]
    pub fn with_capture_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.capture_directory = directory.as_ref().to_path_buf();
        self
    }

    /// Number of samples the frame-rate estimate averages. Clamped to a
    /// minimum of 1.
    #[must_use]
    pub fn with_rate_window(mut self, samples: usize) -> Self {
        self.rate_window = samples.max(1);
        self
    }

    /// How long each tick waits for a key.
    #[must_use]
    pub fn with_poll_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.poll_timeout_ms = timeout_ms;
        self
    }

    /// Attach a token that ends the session when cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Placement handed to the renderer.
    pub fn placement(&self) -> WindowPlacement {
        WindowPlacement {
            position: self.window_position,
            fixed_size: self.fixed_size,
        }
    }

    /// Directory receiving captures.
    pub fn capture_directory(&self) -> &Path {
        &self.capture_directory
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = PlayerOptions::new();
        assert_eq!(
            options.placement(),
            WindowPlacement {
                position: (100, 10),
                fixed_size: None,
            }
        );
        assert_eq!(options.capture_directory(), Path::new("."));
        let debug = format!("{options:?}");
        assert!(debug.contains("rate_window: 10"));
        assert!(debug.contains("has_cancellation: false"));
    }

    #[test]
    fn rate_window_clamps_zero() {
        let options = PlayerOptions::new().with_rate_window(0);
        assert!(format!("{options:?}").contains("rate_window: 1"));
    }

    #[test]
    fn cancellation_is_observed() {
        let token = CancellationToken::new();
        let options = PlayerOptions::new().with_cancellation(token.clone());
        assert!(!options.is_cancelled());
        token.cancel();
        assert!(options.is_cancelled());
    }
}
