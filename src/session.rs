//! The playback loop.
//!
//! [`PlaybackSession`] ties a [`VideoSource`], a [`Renderer`], an
//! [`InputSource`], and a [`FrameWriter`] to the [`PlaybackController`].
//! Each tick paces itself to the controller's delay, measures the achieved
//! frame rate, shows the frame at the current index, and applies at most one
//! command.
//!
//! Only an explicit quit, a shutdown event from the input source, a
//! cancelled [`CancellationToken`](crate::CancellationToken), or a renderer
//! failure end a session. Unreadable frames and failed captures are logged
//! and playback continues. Collaborators are released on every exit path,
//! including when the session is dropped without running.

use std::{hash::Hash, path::PathBuf, time::Duration};

use crate::{
    capture::{FrameWriter, capture_file_name},
    command::{Command, CommandMapper},
    configuration::PlayerOptions,
    controller::{PlaybackController, PlaybackState},
    error::PlayerError,
    frame_rate::FrameRateEstimator,
    render::{InputEvent, InputSource, Renderer},
    source::{Frame, VideoSource},
    timer::Timer,
};

/// Frame rate assumed when the source reports none.
pub const FALLBACK_FRAME_RATE: f64 = 25.0;

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The user issued [`Command::Quit`].
    Quit,
    /// The input source reported a shutdown request (e.g. window closed).
    Shutdown,
    /// The session's cancellation token was cancelled.
    Cancelled,
}

/// What a single tick decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep looping.
    Continue,
    /// Leave the loop.
    Stop(StopReason),
}

/// Counters collected over a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// Frames handed to the renderer.
    pub frames_shown: u64,
    /// Ticks on which no frame could be read.
    pub frames_unavailable: u64,
    /// Captures written successfully, in order.
    pub captures: Vec<PathBuf>,
    /// Captures whose write failed.
    pub failed_captures: u32,
    /// Frame index when the session stopped.
    pub final_frame: i64,
    /// Why the session stopped, if it ran to completion.
    pub stop_reason: Option<StopReason>,
}

/// An interactive playback session.
///
/// # Example
///
/// ```no_run
/// # #[cfg(feature = "window")]
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use framescrub::{
///     CommandMapper, FfmpegSource, ImageFileWriter, PlaybackSession, PlayerOptions, SdlInput,
///     SdlWindow,
/// };
///
/// let sdl = sdl2::init()?;
/// let session = PlaybackSession::new(
///     "input.mp4",
///     FfmpegSource::open("input.mp4")?,
///     SdlWindow::new(&sdl)?,
///     SdlInput::new(&sdl)?,
///     ImageFileWriter,
///     CommandMapper::sdl(),
///     PlayerOptions::default(),
/// )?;
/// let summary = session.run()?;
/// println!("showed {} frames", summary.frames_shown);
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "window"))]
/// # fn main() {}
/// ```
pub struct PlaybackSession<S, R, I, W>
where
    S: VideoSource,
    R: Renderer,
    I: InputSource,
    W: FrameWriter,
{
    title: String,
    source: S,
    renderer: R,
    input: I,
    writer: W,
    mapper: CommandMapper<I::Code>,
    controller: PlaybackController,
    estimator: FrameRateEstimator,
    timer: Timer,
    options: PlayerOptions,
    capture_sequence: u32,
    summary: SessionSummary,
    released: bool,
}

impl<S, R, I, W> PlaybackSession<S, R, I, W>
where
    S: VideoSource,
    R: Renderer,
    I: InputSource,
    I::Code: Eq + Hash,
    W: FrameWriter,
{
    /// Build a session and derive the initial state from `source`.
    ///
    /// The last frame is probed by seeking to it and reading; a failed probe
    /// is logged as [`PlayerError::InvalidFrameCount`] and the session goes
    /// ahead with the reported count.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::InvalidInterval`] only if the frame-rate window
    /// size is zero, which [`PlayerOptions`] already prevents.
    pub fn new(
        title: impl Into<String>,
        mut source: S,
        renderer: R,
        input: I,
        writer: W,
        mapper: CommandMapper<I::Code>,
        options: PlayerOptions,
    ) -> Result<Self, PlayerError> {
        let frame_count = source.frame_count();
        let base_delay = base_delay_for(source.reported_rate());
        let state = PlaybackState::new(frame_count, base_delay);

        if state.last_frame >= 0 && !probe_last_frame(&mut source, state.last_frame) {
            log::warn!(
                "{}",
                PlayerError::InvalidFrameCount {
                    reported: frame_count
                }
            );
        }

        log::debug!(
            "Session state: last_frame={}, base_delay={:?}",
            state.last_frame,
            state.base_delay
        );

        let estimator = FrameRateEstimator::new(options.rate_window)?;

        Ok(Self {
            title: title.into(),
            source,
            renderer,
            input,
            writer,
            mapper,
            controller: PlaybackController::new(state),
            estimator,
            timer: Timer::new(),
            options,
            capture_sequence: 0,
            summary: SessionSummary::default(),
            released: false,
        })
    }

    /// Current playback state.
    pub fn state(&self) -> &PlaybackState {
        self.controller.state()
    }

    /// The controller driving this session.
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Counters so far.
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Open the window and tick until the session stops.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error if the window cannot be created or a
    /// frame cannot be drawn. Collaborators are released either way.
    pub fn run(mut self) -> Result<SessionSummary, PlayerError> {
        let result = self.run_ticks();
        self.release();
        result?;
        Ok(std::mem::take(&mut self.summary))
    }

    fn run_ticks(&mut self) -> Result<(), PlayerError> {
        self.renderer
            .create_window(&self.title, self.options.placement())?;
        self.timer.reset();

        loop {
            if let TickOutcome::Stop(reason) = self.tick()? {
                log::info!("Playback stopped ({reason:?}) at frame {}", self.summary.final_frame);
                return Ok(());
            }
        }
    }

    /// Run one iteration of the loop.
    ///
    /// # Errors
    ///
    /// Only renderer failures are returned; everything else is logged.
    pub fn tick(&mut self) -> Result<TickOutcome, PlayerError> {
        self.summary.ticks += 1;

        self.timer
            .sleep_at_least(self.controller.state().current_delay);
        let interval = self.timer.elapsed();
        self.timer.reset();
        let rate = match self.estimator.update(interval) {
            Ok(rate) => rate,
            Err(error) => {
                log::debug!("Frame-rate sample dropped: {error}");
                self.estimator.rate()
            }
        };

        let state = *self.controller.state();
        let frame = self.fetch(state.current_frame);

        if let Some(frame) = &frame {
            let overlay = status_line(state.current_frame, state.last_frame, rate);
            self.renderer.show(frame, &overlay)?;
            self.summary.frames_shown += 1;

            if state.full_screen != self.renderer.is_full_screen() {
                self.renderer.set_full_screen(state.full_screen)?;
            }
        }

        if self.options.is_cancelled() {
            return Ok(self.stop(StopReason::Cancelled));
        }

        let command = match self.input.poll_code(self.options.poll_timeout_ms) {
            InputEvent::Key(code) => self.mapper.map(Some(code)),
            InputEvent::NoInput => Command::None,
            InputEvent::Shutdown => return Ok(self.stop(StopReason::Shutdown)),
        };

        match command {
            Command::Capture => {
                if let Some(frame) = &frame {
                    self.capture(frame);
                }
            }
            Command::Quit => return Ok(self.stop(StopReason::Quit)),
            _ => {}
        }

        self.controller.apply(command);
        self.summary.final_frame = self.controller.state().current_frame;
        Ok(TickOutcome::Continue)
    }

    /// Seek only when the source is not already positioned, then read.
    fn fetch(&mut self, frame_index: i64) -> Option<Frame> {
        if self.source.position() != frame_index {
            if let Err(error) = self.source.seek(frame_index) {
                log::warn!("Failed to seek to frame {frame_index}: {error}");
                self.summary.frames_unavailable += 1;
                return None;
            }
        }

        match self.source.read_frame() {
            Ok(Some(frame)) => Some(frame),
            Ok(None) => {
                log::debug!("{}", PlayerError::FrameUnavailable(frame_index));
                self.summary.frames_unavailable += 1;
                None
            }
            Err(error) => {
                log::warn!("Failed to read frame {frame_index}: {error}");
                self.summary.frames_unavailable += 1;
                None
            }
        }
    }

    fn capture(&mut self, frame: &Frame) {
        let path = self
            .options
            .capture_directory()
            .join(capture_file_name(self.capture_sequence));
        self.capture_sequence += 1;

        match self.writer.write_frame(&path, frame) {
            Ok(()) => {
                log::info!("Image captured to {}", path.display());
                self.summary.captures.push(path);
            }
            Err(error) => {
                log::warn!("{error}");
                self.summary.failed_captures += 1;
            }
        }
    }

    fn stop(&mut self, reason: StopReason) -> TickOutcome {
        self.summary.final_frame = self.controller.state().current_frame;
        self.summary.stop_reason = Some(reason);
        TickOutcome::Stop(reason)
    }
}

impl<S, R, I, W> PlaybackSession<S, R, I, W>
where
    S: VideoSource,
    R: Renderer,
    I: InputSource,
    W: FrameWriter,
{
    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.renderer.destroy_window();
        self.source.release();
        log::debug!("Released session collaborators");
    }
}

impl<S, R, I, W> Drop for PlaybackSession<S, R, I, W>
where
    S: VideoSource,
    R: Renderer,
    I: InputSource,
    W: FrameWriter,
{
    fn drop(&mut self) {
        self.release();
    }
}

/// Overlay text drawn on every displayed frame.
pub fn status_line(current_frame: i64, last_frame: i64, frames_per_second: f64) -> String {
    format!("Frame {current_frame} / {last_frame} ({frames_per_second:.1} FPS)")
}

/// Delay for one frame at `rate`, falling back to [`FALLBACK_FRAME_RATE`]
/// when the rate is unusable.
fn base_delay_for(rate: f64) -> Duration {
    if rate.is_finite() && rate > 0.0 {
        if let Ok(delay) = Duration::try_from_secs_f64(1.0 / rate) {
            return delay;
        }
    }
    log::warn!("Source reports an unusable frame rate ({rate}); assuming {FALLBACK_FRAME_RATE} FPS");
    Duration::from_secs_f64(1.0 / FALLBACK_FRAME_RATE)
}

/// Check that the reported last frame can actually be read.
fn probe_last_frame<S: VideoSource>(source: &mut S, last_frame: i64) -> bool {
    if let Err(error) = source.seek(last_frame) {
        log::debug!("Probe seek to frame {last_frame} failed: {error}");
        return false;
    }
    matches!(source.read_frame(), Ok(Some(_)))
}
