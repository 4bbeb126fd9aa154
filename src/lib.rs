//! # framescrub
//!
//! A frame-accurate video scrubber. `framescrub` decodes a video with FFmpeg
//! (via [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next)), shows it in a
//! window, and lets the operator move by exact frame index while pacing,
//! pausing, switching to full screen, or capturing single frames to disk.
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "window")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use framescrub::{
//!     CommandMapper, FfmpegSource, ImageFileWriter, PlaybackSession, PlayerOptions, SdlInput,
//!     SdlWindow,
//! };
//!
//! let sdl = sdl2::init()?;
//! let summary = PlaybackSession::new(
//!     "input.mp4",
//!     FfmpegSource::open("input.mp4")?,
//!     SdlWindow::new(&sdl)?,
//!     SdlInput::new(&sdl)?,
//!     ImageFileWriter,
//!     CommandMapper::sdl(),
//!     PlayerOptions::new().with_capture_directory("captures"),
//! )?
//! .run()?;
//! println!("{} captures", summary.captures.len());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "window"))]
//! # fn main() {}
//! ```
//!
//! ## Driving the controller directly
//!
//! The state machine has no I/O and can be used on its own:
//!
//! ```
//! use std::time::Duration;
//!
//! use framescrub::{Command, PlaybackController, PlaybackState};
//!
//! let mut controller = PlaybackController::new(PlaybackState::new(100, Duration::from_millis(40)));
//! controller.apply(Command::GoEnd);
//! controller.apply(Command::StepFwd1);
//! assert_eq!(controller.state().current_frame, 99);
//! ```
//!
//! ## Architecture
//!
//! - [`PlaybackController`]: applies [`Command`]s to a [`PlaybackState`]
//!   and enforces frame bounds and speed limits
//! - [`PlaybackSession`]: the tick loop: pacing, rate measurement, fetch,
//!   display, input, capture
//! - [`Timer`] and [`FrameRateEstimator`]: pacing and the smoothed FPS
//!   shown in the overlay
//! - [`CommandMapper`]: injected key-code table
//! - [`draw_overlay`]: bitmap status text for renderers without a title bar
//! - [`VideoSource`], [`Renderer`], [`InputSource`], [`FrameWriter`]:
//!   collaborator traits, implemented by [`FfmpegSource`], [`SdlWindow`],
//!   [`SdlInput`], and [`ImageFileWriter`]
//!
//! ### Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `window` (default) | SDL2 window and keyboard backend, and the `framescrub` binary |
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed, plus SDL2 for the
//! `window` feature.

pub mod cancellation;
pub mod capture;
pub mod command;
pub mod configuration;
pub mod controller;
mod conversion;
pub mod error;
pub mod frame_rate;
pub mod metadata;
pub mod overlay;
pub mod render;
pub mod session;
pub mod source;
pub mod timer;
#[cfg(feature = "window")]
pub mod window;

pub use cancellation::CancellationToken;
pub use capture::{FrameWriter, ImageFileWriter, capture_file_name};
pub use command::{Command, CommandMapper};
pub use configuration::PlayerOptions;
pub use controller::{MAX_SPEED_FACTOR, PlaybackController, PlaybackState};
pub use error::PlayerError;
pub use frame_rate::{DEFAULT_RATE_WINDOW, FrameRateEstimator};
pub use metadata::VideoInfo;
pub use overlay::draw_overlay;
pub use render::{InputEvent, InputSource, Renderer, WindowPlacement};
pub use session::{PlaybackSession, SessionSummary, StopReason, TickOutcome, status_line};
pub use source::{FfmpegSource, Frame, VideoSource};
pub use timer::Timer;
#[cfg(feature = "window")]
pub use window::{SdlInput, SdlWindow};
