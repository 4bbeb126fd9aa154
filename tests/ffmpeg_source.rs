//! FfmpegSource integration tests.
//!
//! Tests skip when `tests/fixtures/sample_video.mp4` is missing. A suitable
//! fixture can be made with
//! `ffmpeg -f lavfi -i testsrc=duration=5:size=320x240:rate=30 -pix_fmt yuv420p tests/fixtures/sample_video.mp4`.
//! The MPEG-TS variant (non-zero start time) is the same command with a
//! `.ts` output.

use std::path::Path;

use framescrub::{FfmpegSource, VideoSource};

fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_video.mp4"
}

fn open_sample() -> Option<FfmpegSource> {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return None;
    }
    Some(FfmpegSource::open(path).expect("Failed to open fixture"))
}

// ── metadata ───────────────────────────────────────────────────────

#[test]
fn reports_stream_information() {
    let Some(source) = open_sample() else {
        return;
    };

    let info = source.info();
    assert!(info.width > 0);
    assert!(info.height > 0);
    assert!(info.frames_per_second > 0.0);
    assert!(info.frame_count > 0);
    assert_eq!(source.frame_count(), info.frame_count);
    assert_eq!(source.reported_rate(), info.frames_per_second);
    assert_eq!(source.path(), Path::new(sample_video_path()));
}

#[test]
fn video_info_display_lists_every_field() {
    let Some(source) = open_sample() else {
        return;
    };

    let text = source.info().to_string();
    assert!(text.contains("Frame rate:"), "{text}");
    assert!(text.contains("Number of frames:"), "{text}");
    assert!(text.contains("Frame size:"), "{text}");
    assert!(text.contains("Codec:"), "{text}");
}

// ── sequential reads ───────────────────────────────────────────────

#[test]
fn reads_frames_in_order_from_start() {
    let Some(mut source) = open_sample() else {
        return;
    };

    assert_eq!(source.position(), 0);
    for expected in 0..5 {
        let frame = source
            .read_frame()
            .expect("Decode error")
            .expect("Frame should be available");
        assert_eq!(frame.index, expected);
        assert_eq!(source.position(), expected + 1);
    }
}

#[test]
fn frames_match_stream_dimensions() {
    let Some(mut source) = open_sample() else {
        return;
    };

    let (width, height) = (source.info().width, source.info().height);
    let frame = source.read_frame().unwrap().unwrap();
    assert_eq!(frame.image.dimensions(), (width, height));
    assert_eq!(frame.image.as_raw().len(), (width * height * 3) as usize);
}

// ── seeking ────────────────────────────────────────────────────────

#[test]
fn seek_lands_on_requested_frame() {
    let Some(mut source) = open_sample() else {
        return;
    };

    let target = source.frame_count() / 2;
    source.seek(target).expect("Seek failed");
    assert_eq!(source.position(), target);

    let frame = source.read_frame().unwrap().unwrap();
    assert_eq!(frame.index, target);
    assert_eq!(source.position(), target + 1);
}

#[test]
fn seek_backwards_after_reading() {
    let Some(mut source) = open_sample() else {
        return;
    };

    source.seek(20).unwrap();
    source.read_frame().unwrap();

    source.seek(3).unwrap();
    let frame = source.read_frame().unwrap().unwrap();
    assert_eq!(frame.index, 3);
}

#[test]
fn seek_then_read_matches_sequential_decode() {
    let Some(mut source) = open_sample() else {
        return;
    };

    let mut sequential = None;
    for _ in 0..=12 {
        sequential = source.read_frame().unwrap();
    }
    let sequential = sequential.expect("Frame 12 should decode");

    source.seek(12).unwrap();
    let sought = source.read_frame().unwrap().unwrap();

    assert_eq!(sought.index, sequential.index);
    assert_eq!(sought.image.as_raw(), sequential.image.as_raw());
}

#[test]
fn last_reported_frame_is_readable() {
    let Some(mut source) = open_sample() else {
        return;
    };

    let last = source.frame_count() - 1;
    source.seek(last).unwrap();
    let frame = source.read_frame().unwrap();
    assert!(frame.is_some(), "Frame {last} should be readable");
}

#[test]
fn reading_past_the_end_yields_none() {
    let Some(mut source) = open_sample() else {
        return;
    };

    source.seek(source.frame_count() + 1_000).unwrap();
    assert!(source.read_frame().unwrap().is_none());
}

#[test]
fn seek_honours_nonzero_start_time() {
    let path = "tests/fixtures/sample_video.ts";
    if !Path::new(path).exists() {
        return;
    }

    let mut source = FfmpegSource::open(path).expect("Failed to open fixture");
    source.seek(5).expect("Seek failed");
    source.seek(0).expect("Seek to the first frame failed");

    let frame = source.read_frame().unwrap().expect("Frame 0 should be reachable");
    assert_eq!(frame.index, 0);
}

// ── release ────────────────────────────────────────────────────────

#[test]
fn release_is_idempotent_and_stops_reads() {
    let Some(mut source) = open_sample() else {
        return;
    };

    source.release();
    source.release();

    assert!(source.read_frame().unwrap().is_none());
    assert!(source.seek(0).is_ok());
}
