//! Internal conversion helpers.
//!
//! Pixel-plane copying and the frame-index / timestamp arithmetic shared by
//! the FFmpeg source.

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy pixel data from an FFmpeg video frame into a tightly-packed buffer.
///
/// FFmpeg frames often carry per-row padding (stride > width × bpp), which
/// is stripped so the result can go straight into
/// [`image::RgbImage::from_raw`].
pub fn frame_to_buffer(
    video_frame: &VideoFrame,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let expected_stride = (width as usize) * bytes_per_pixel;
    let data = video_frame.data(0);

    if stride == expected_stride {
        data[..expected_stride * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(expected_stride * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + expected_stride]);
        }
        buffer
    }
}

/// Convert a frame index to a seek timestamp in AV_TIME_BASE (microseconds).
///
/// `Input::seek` with no stream selected expects AV_TIME_BASE units on the
/// container timeline, so frame 0 sits at `start_time_us`, the stream's first
/// timestamp.
pub fn frame_index_to_seek_timestamp(
    frame_index: i64,
    frames_per_second: f64,
    start_time_us: i64,
) -> i64 {
    if frames_per_second <= 0.0 {
        return start_time_us;
    }
    let seconds = frame_index.max(0) as f64 / frames_per_second;
    start_time_us.saturating_add((seconds * 1_000_000.0) as i64)
}

/// Stream start PTS expressed in AV_TIME_BASE (microseconds).
pub fn start_pts_to_microseconds(start_pts: i64, time_base: Rational) -> i64 {
    (pts_to_seconds(start_pts, time_base) * 1_000_000.0).round() as i64
}

/// Rescale a PTS value from stream time base to seconds.
pub fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    if time_base.denominator() == 0 {
        return 0.0;
    }
    pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64
}

/// Rescale a PTS value to the nearest frame index.
pub fn pts_to_frame_index(pts: i64, time_base: Rational, frames_per_second: f64) -> i64 {
    let seconds = pts_to_seconds(pts, time_base);
    (seconds * frames_per_second).round() as i64
}

/// Frame rate from a rational, or `None` when it is undefined.
pub fn rational_to_rate(rate: Rational) -> Option<f64> {
    if rate.numerator() > 0 && rate.denominator() > 0 {
        Some(rate.numerator() as f64 / rate.denominator() as f64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_timestamp_in_microseconds() {
        assert_eq!(frame_index_to_seek_timestamp(25, 25.0, 0), 1_000_000);
        assert_eq!(frame_index_to_seek_timestamp(0, 30.0, 0), 0);
        assert_eq!(frame_index_to_seek_timestamp(-5, 30.0, 0), 0);
        assert_eq!(frame_index_to_seek_timestamp(10, 0.0, 0), 0);
    }

    #[test]
    fn seek_timestamp_starts_at_stream_start() {
        // MPEG-TS style stream starting at 1.4 s (126000 ticks at 90 kHz).
        let start = start_pts_to_microseconds(126_000, Rational::new(1, 90_000));
        assert_eq!(start, 1_400_000);

        assert_eq!(frame_index_to_seek_timestamp(0, 25.0, start), 1_400_000);
        assert_eq!(frame_index_to_seek_timestamp(25, 25.0, start), 2_400_000);
        assert_eq!(frame_index_to_seek_timestamp(-3, 25.0, start), 1_400_000);
        assert_eq!(frame_index_to_seek_timestamp(7, 0.0, start), 1_400_000);

        // Seeking to index n and mapping its PTS back agree.
        let pts_of_frame_10 = 126_000 + 10 * 3600;
        let time_base = Rational::new(1, 90_000);
        assert_eq!(pts_to_frame_index(pts_of_frame_10 - 126_000, time_base, 25.0), 10);
        assert_eq!(
            frame_index_to_seek_timestamp(10, 25.0, start),
            (pts_to_seconds(pts_of_frame_10, time_base) * 1_000_000.0).round() as i64
        );
    }

    #[test]
    fn pts_rounds_to_nearest_frame() {
        // 1/90000 time base, 30 fps: one frame is 3000 ticks.
        let time_base = Rational::new(1, 90_000);
        assert_eq!(pts_to_frame_index(0, time_base, 30.0), 0);
        assert_eq!(pts_to_frame_index(3000, time_base, 30.0), 1);
        assert_eq!(pts_to_frame_index(8999, time_base, 30.0), 3);
    }

    #[test]
    fn undefined_rates() {
        assert_eq!(rational_to_rate(Rational::new(0, 1)), None);
        assert_eq!(rational_to_rate(Rational::new(30, 0)), None);
        let rate = rational_to_rate(Rational::new(30_000, 1001)).unwrap();
        assert!((rate - 29.97).abs() < 0.01);
    }
}
