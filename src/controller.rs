//! Playback state and its transition function.
//!
//! [`PlaybackController`] owns the only state carried between ticks of the
//! playback loop. Every [`apply`](PlaybackController::apply) ends with bounds
//! enforcement, so `0 <= current_frame <= last_frame` holds after any
//! sequence of commands whenever the last frame is known.

use std::time::Duration;

use crate::command::Command;

/// Largest factor by which the delay may shrink or grow relative to the
/// delay of the source frame rate.
pub const MAX_SPEED_FACTOR: u32 = 64;

/// Frames moved by [`Command::JumpBack100`] / [`Command::JumpFwd100`].
const LONG_JUMP: i64 = 100;
/// Frames moved by [`Command::JumpBack10`] / [`Command::JumpFwd10`].
const SHORT_JUMP: i64 = 10;

/// Snapshot of the playback position and pacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// Frame index to display next.
    pub current_frame: i64,
    /// Index of the last frame, or `-1` when the source is empty or unknown.
    pub last_frame: i64,
    /// Delay matching the source frame rate (100% speed).
    pub base_delay: Duration,
    /// Delay currently used to pace the loop. Always positive.
    pub current_delay: Duration,
    /// Whether auto-advance is suspended.
    pub paused: bool,
    /// Whether the window should be full screen.
    pub full_screen: bool,
}

impl PlaybackState {
    /// State for a source with `frame_count` frames, paced at `base_delay`.
    ///
    /// A zero `base_delay` is raised to one nanosecond.
    pub fn new(frame_count: i64, base_delay: Duration) -> Self {
        let base_delay = base_delay.max(Duration::from_nanos(1));
        Self {
            current_frame: 0,
            last_frame: frame_count.saturating_sub(1).max(-1),
            base_delay,
            current_delay: base_delay,
            paused: false,
            full_screen: false,
        }
    }
}

/// Applies [`Command`]s to a [`PlaybackState`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use framescrub::{Command, PlaybackController, PlaybackState};
///
/// let mut controller = PlaybackController::new(PlaybackState::new(100, Duration::from_millis(40)));
/// controller.apply(Command::JumpFwd100);
/// assert_eq!(controller.state().current_frame, 99);
///
/// controller.apply(Command::StepBack1);
/// assert_eq!(controller.state().current_frame, 98);
/// assert!(controller.state().paused);
/// ```
#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    min_delay: Duration,
    max_delay: Duration,
}

impl PlaybackController {
    /// Take ownership of `state`, enforcing bounds on it immediately.
    pub fn new(state: PlaybackState) -> Self {
        let base_delay = state.base_delay.max(Duration::from_nanos(1));
        let mut controller = Self {
            state: PlaybackState {
                base_delay,
                ..state
            },
            min_delay: (base_delay / MAX_SPEED_FACTOR).max(Duration::from_nanos(1)),
            max_delay: base_delay.saturating_mul(MAX_SPEED_FACTOR),
        };
        controller.state.current_delay = controller.clamp_delay(state.current_delay);
        controller.enforce_bounds();
        controller
    }

    /// Current state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Playback speed relative to the source frame rate (1.0 = 100%).
    pub fn speed(&self) -> f64 {
        self.state.base_delay.as_secs_f64() / self.state.current_delay.as_secs_f64()
    }

    /// Apply `command`, then clamp the frame index into range.
    ///
    /// [`Command::Capture`] and [`Command::Quit`] leave the state untouched;
    /// acting on them is the caller's job.
    pub fn apply(&mut self, command: Command) -> &PlaybackState {
        let (min_delay, max_delay) = (self.min_delay, self.max_delay);
        let state = &mut self.state;
        match command {
            Command::TogglePause => state.paused = !state.paused,
            Command::JumpBack100 => {
                state.current_frame = state.current_frame.saturating_sub(LONG_JUMP);
            }
            Command::JumpFwd100 => {
                state.current_frame = state.current_frame.saturating_add(LONG_JUMP);
            }
            Command::JumpBack10 => {
                state.current_frame = state.current_frame.saturating_sub(SHORT_JUMP);
                state.paused = true;
            }
            Command::JumpFwd10 => {
                state.current_frame = state.current_frame.saturating_add(SHORT_JUMP);
                state.paused = true;
            }
            Command::StepBack1 => {
                state.current_frame = state.current_frame.saturating_sub(1);
                state.paused = true;
            }
            Command::StepFwd1 => {
                state.current_frame = state.current_frame.saturating_add(1);
                state.paused = true;
            }
            Command::SpeedUp => {
                state.current_delay = (state.current_delay / 2).clamp(min_delay, max_delay);
            }
            Command::SpeedDown => {
                state.current_delay = state
                    .current_delay
                    .saturating_mul(2)
                    .clamp(min_delay, max_delay);
            }
            Command::ResetSpeed => state.current_delay = state.base_delay,
            Command::GoHome => {
                state.current_frame = 0;
                state.paused = true;
            }
            Command::GoEnd => {
                state.current_frame = state.last_frame;
                state.paused = true;
            }
            Command::ToggleFullScreen => state.full_screen = !state.full_screen,
            Command::Capture | Command::Quit => {}
            Command::None => {
                if state.current_frame < state.last_frame && !state.paused {
                    state.current_frame = state.current_frame.saturating_add(1);
                }
            }
        }

        self.enforce_bounds();
        &self.state
    }

    fn clamp_delay(&self, delay: Duration) -> Duration {
        delay.clamp(self.min_delay, self.max_delay)
    }

    fn enforce_bounds(&mut self) {
        let upper = self.state.last_frame.max(0);
        self.state.current_frame = self.state.current_frame.clamp(0, upper);
    }
}
