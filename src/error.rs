//! Error types for the `framescrub` crate.
//!
//! This module defines [`PlayerError`], the unified error type returned by all
//! fallible operations in the crate. Errors carry enough context (file paths,
//! frame indices, upstream messages) to be reported without extra logging at
//! the call site.
//!
//! Only [`NotFound`](PlayerError::NotFound) and
//! [`OpenError`](PlayerError::OpenError) are fatal, and both occur before
//! the playback loop starts. Everything raised once the loop is running is
//! logged and the session carries on.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framescrub` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlayerError {
    /// The video path does not exist or is not accessible.
    #[error("{path} does not exist or is not accessible")]
    NotFound {
        /// Path that was passed to the source.
        path: PathBuf,
    },

    /// The video exists but could not be opened or decoded.
    #[error("Failed to open video at {path}: {reason}")]
    OpenError {
        /// Path that was passed to the source.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The container reported a frame count whose last frame cannot be read.
    ///
    /// Non-fatal: logged as a warning at session start.
    #[error("Invalid number of frames in video header (reported {reported})")]
    InvalidFrameCount {
        /// Frame count reported by the container.
        reported: i64,
    },

    /// No frame could be read at the given index.
    #[error("Frame {0} is unavailable")]
    FrameUnavailable(i64),

    /// A captured frame could not be written to disk.
    #[error("Failed to write capture to {path}: {reason}")]
    CaptureWrite {
        /// Destination of the capture.
        path: PathBuf,
        /// Underlying reason the write failed.
        reason: String,
    },

    /// A frame interval (or rate window size) of zero was provided.
    #[error("Interval must be greater than zero")]
    InvalidInterval,

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// The window backend failed to create, draw, or reconfigure the window.
    #[error("Render error: {0}")]
    RenderError(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while encoding a capture.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for PlayerError {
    fn from(error: FfmpegError) -> Self {
        PlayerError::FfmpegError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let error = PlayerError::NotFound {
            path: PathBuf::from("missing.mp4"),
        };
        assert!(error.to_string().contains("missing.mp4"));

        let error = PlayerError::InvalidFrameCount { reported: 120 };
        assert!(error.to_string().contains("120"));

        let error = PlayerError::CaptureWrite {
            path: PathBuf::from("cap00.png"),
            reason: "disk full".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("cap00.png") && message.contains("disk full"));
    }

    #[test]
    fn io_errors_convert() {
        let error: PlayerError = IoError::other("boom").into();
        assert!(matches!(error, PlayerError::IoError(_)));
    }
}
