//! Video stream information.
//!
//! [`VideoInfo`] is read once when a source is opened and printed by the
//! `framescrub` binary before playback starts.

use std::fmt;

/// Properties of the video stream being played.
///
/// # Example
///
/// ```no_run
/// use framescrub::FfmpegSource;
///
/// let source = FfmpegSource::open("input.mp4")?;
/// println!("{}", source.info());
/// # Ok::<(), framescrub::PlayerError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct VideoInfo {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second reported by the container (may be approximate for
    /// variable-frame-rate content).
    pub frames_per_second: f64,
    /// Number of frames reported by the container, or estimated from
    /// duration and frame rate when the container does not store it.
    pub frame_count: i64,
    /// Codec name (e.g. `"h264"`, `"vp9"`).
    pub codec: String,
}

impl fmt::Display for VideoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frame rate: {:.2}", self.frames_per_second)?;
        writeln!(f, "Number of frames: {}", self.frame_count)?;
        writeln!(f, "Frame size: {} x {}", self.width, self.height)?;
        write!(f, "Codec: {}", self.codec)
    }
}
