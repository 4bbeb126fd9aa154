//! Error handling integration tests.
//!
//! These tests verify that meaningful errors are returned for the failures
//! that can happen before playback starts, and that the ones raised during
//! playback carry enough context to be logged on their own.

use std::path::{Path, PathBuf};

use framescrub::{FfmpegSource, Frame, FrameWriter, ImageFileWriter, PlayerError};
use image::RgbImage;

#[test]
fn open_nonexistent_file() {
    let result = FfmpegSource::open("this_file_does_not_exist.mp4");

    match result {
        Err(PlayerError::NotFound { path }) => {
            assert_eq!(path, PathBuf::from("this_file_does_not_exist.mp4"));
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[test]
fn nonexistent_file_message_names_the_path() {
    let error = FfmpegSource::open("missing_clip.avi").unwrap_err();
    let error_message = error.to_string();
    assert!(
        error_message.contains("missing_clip.avi"),
        "Error message should name the file: {error_message}",
    );
}

#[test]
fn open_invalid_file() {
    // Create a temporary file with garbage content.
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a video file")
        .expect("Failed to write invalid file");

    let result = FfmpegSource::open(&invalid_file_path);
    assert!(
        matches!(result, Err(PlayerError::OpenError { .. })),
        "Expected OpenError for invalid video file, got {result:?}",
    );

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to open video"),
        "Error message should mention open failure: {error_message}",
    );
}

#[test]
fn audio_only_file_is_rejected() {
    let path = "tests/fixtures/sample_audio_only.mp4";
    if !Path::new(path).exists() {
        return;
    }

    let result = FfmpegSource::open(path);
    match result {
        Err(PlayerError::OpenError { reason, .. }) => {
            assert!(reason.contains("no video stream"), "Unexpected reason: {reason}");
        }
        other => panic!("Expected OpenError, got {other:?}"),
    }
}

#[test]
fn capture_into_missing_directory_fails() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temporary_directory
        .path()
        .join("does")
        .join("not")
        .join("exist")
        .join("cap00.png");

    let frame = Frame::new(0, RgbImage::new(4, 4));
    let result = ImageFileWriter.write_frame(&path, &frame);

    match result {
        Err(PlayerError::CaptureWrite { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("Expected CaptureWrite, got {other:?}"),
    }
}

#[test]
fn playback_errors_describe_themselves() {
    let unavailable = PlayerError::FrameUnavailable(42).to_string();
    assert!(unavailable.contains("42"), "{unavailable}");

    let header = PlayerError::InvalidFrameCount { reported: 1200 }.to_string();
    assert!(header.contains("1200"), "{header}");
}
