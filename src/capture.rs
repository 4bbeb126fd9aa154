//! Single-frame capture to disk.
//!
//! Captures are named `cap00.png`, `cap01.png`, … in the order they are
//! taken. The sequence is local to a session and always advances, even when
//! a write fails, so a retry never overwrites an earlier capture.

use std::path::Path;

use crate::{error::PlayerError, source::Frame};

/// Persists captured frames.
pub trait FrameWriter {
    /// Write `frame` to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::CaptureWrite`] if the file cannot be written.
    fn write_frame(&mut self, path: &Path, frame: &Frame) -> Result<(), PlayerError>;
}

/// Writes frames with the `image` crate; the format follows the file
/// extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileWriter;

impl FrameWriter for ImageFileWriter {
    fn write_frame(&mut self, path: &Path, frame: &Frame) -> Result<(), PlayerError> {
        frame
            .image
            .save(path)
            .map_err(|error| PlayerError::CaptureWrite {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })
    }
}

/// File name for capture number `sequence` (`cap00.png`, `cap01.png`, …).
pub fn capture_file_name(sequence: u32) -> String {
    format!("cap{sequence:02}.png")
}
