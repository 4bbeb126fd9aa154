//! Video sources.
//!
//! The playback loop pulls frames through the [`VideoSource`] trait.
//! [`FfmpegSource`] is the decoder used by the `framescrub` binary: it seeks
//! to the nearest keyframe before a target index and decodes forward until
//! the exact frame is reached, so every index is addressable.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{
    Rational,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;

use crate::{conversion, error::PlayerError, metadata::VideoInfo};

/// A decoded frame and the index it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Zero-based frame index.
    pub index: i64,
    /// RGB pixel data.
    pub image: RgbImage,
}

impl Frame {
    /// Wrap `image` as the frame at `index`.
    pub fn new(index: i64, image: RgbImage) -> Self {
        Self { index, image }
    }
}

/// A seekable stream of frames.
///
/// Positions follow the "next frame to read" convention: after reading frame
/// `n`, [`position`](VideoSource::position) is `n + 1`.
pub trait VideoSource {
    /// Number of frames the container reports. May be wrong for damaged or
    /// variable-frame-rate files.
    fn frame_count(&self) -> i64;

    /// Frames per second the container reports.
    fn reported_rate(&self) -> f64;

    /// Position the source so the next read returns `frame_index`.
    fn seek(&mut self, frame_index: i64) -> Result<(), PlayerError>;

    /// Index of the frame the next [`read_frame`](VideoSource::read_frame)
    /// will return.
    fn position(&self) -> i64;

    /// Read the frame at the current position and advance by one.
    ///
    /// `Ok(None)` means no frame is available there (end of stream or an
    /// undecodable region).
    fn read_frame(&mut self) -> Result<Option<Frame>, PlayerError>;

    /// Close the underlying resource. Later reads return `Ok(None)`.
    fn release(&mut self);
}

/// FFmpeg-backed [`VideoSource`].
///
/// # Example
///
/// ```no_run
/// use framescrub::{FfmpegSource, VideoSource};
///
/// let mut source = FfmpegSource::open("input.mp4")?;
/// source.seek(100)?;
/// if let Some(frame) = source.read_frame()? {
///     frame.image.save("frame_100.png")?;
/// }
/// # Ok::<(), framescrub::PlayerError>(())
/// ```
pub struct FfmpegSource {
    input_context: Option<Input>,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    stream_index: usize,
    time_base: Rational,
    start_pts: i64,
    /// `start_pts` on the container timeline, where frame 0 is sought.
    start_time_us: i64,
    info: VideoInfo,
    position: i64,
    pending: Option<(i64, VideoFrame)>,
    drained: bool,
    file_path: PathBuf,
}

impl Debug for FfmpegSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FfmpegSource")
            .field("info", &self.info)
            .field("stream_index", &self.stream_index)
            .field("position", &self.position)
            .field("start_time_us", &self.start_time_us)
            .field("released", &self.input_context.is_none())
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl FfmpegSource {
    /// Open a video file and prepare its best video stream for decoding.
    ///
    /// # Errors
    ///
    /// - [`PlayerError::NotFound`] if `path` does not exist.
    /// - [`PlayerError::OpenError`] if the file cannot be demuxed, has no
    ///   video stream, or its decoder cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PlayerError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        if !path.exists() {
            return Err(PlayerError::NotFound { path: file_path });
        }

        log::debug!("Opening video: {}", file_path.display());

        let open_error = |reason: String| PlayerError::OpenError {
            path: file_path.clone(),
            reason,
        };

        ffmpeg_next::init()
            .map_err(|error| open_error(format!("FFmpeg initialisation failed: {error}")))?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| open_error(error.to_string()))?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or_else(|| open_error("no video stream found in file".to_string()))?;

        let stream_index = stream.index();
        let time_base = stream.time_base();
        let start_pts = stream.start_time().max(0);
        let start_time_us = conversion::start_pts_to_microseconds(start_pts, time_base);
        let reported_frames = stream.frames();

        let frames_per_second = conversion::rational_to_rate(stream.avg_frame_rate())
            .or_else(|| conversion::rational_to_rate(stream.rate()))
            .unwrap_or(0.0);

        let decoder_context = CodecContext::from_parameters(stream.parameters())
            .map_err(|error| open_error(format!("Failed to read codec parameters: {error}")))?;
        let decoder = decoder_context
            .decoder()
            .video()
            .map_err(|error| open_error(format!("Failed to create video decoder: {error}")))?;

        let width = decoder.width();
        let height = decoder.height();

        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )
        .map_err(|error| open_error(format!("Failed to create pixel converter: {error}")))?;

        // Containers that do not store a frame count get an estimate from
        // the duration (in AV_TIME_BASE units).
        let frame_count = if reported_frames > 0 {
            reported_frames
        } else if input_context.duration() > 0 && frames_per_second > 0.0 {
            (input_context.duration() as f64 / 1_000_000.0 * frames_per_second) as i64
        } else {
            0
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let info = VideoInfo {
            width,
            height,
            frames_per_second,
            frame_count,
            codec,
        };

        log::info!(
            "Opened video: {} ({}x{}, {:.2} fps, {} frames, codec={})",
            file_path.display(),
            info.width,
            info.height,
            info.frames_per_second,
            info.frame_count,
            info.codec,
        );

        Ok(Self {
            input_context: Some(input_context),
            decoder,
            scaler,
            stream_index,
            time_base,
            start_pts,
            start_time_us,
            info,
            position: 0,
            pending: None,
            drained: false,
            file_path,
        })
    }

    /// Stream information cached at open time.
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    /// Path the source was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Index of a decoded frame, derived from its timestamp.
    fn frame_index_of(&self, frame: &VideoFrame) -> Option<i64> {
        frame.timestamp().or_else(|| frame.pts()).map(|pts| {
            conversion::pts_to_frame_index(
                pts - self.start_pts,
                self.time_base,
                self.info.frames_per_second,
            )
        })
    }

    /// Decode the next frame of the selected stream, feeding packets as
    /// needed. Returns `None` once the decoder is fully drained.
    fn decode_next(&mut self) -> Result<Option<VideoFrame>, PlayerError> {
        let mut decoded_frame = VideoFrame::empty();
        loop {
            if self.decoder.receive_frame(&mut decoded_frame).is_ok() {
                return Ok(Some(decoded_frame));
            }
            if self.drained {
                return Ok(None);
            }

            let Some(input_context) = self.input_context.as_mut() else {
                return Ok(None);
            };

            let mut next_packet = None;
            for (stream, packet) in input_context.packets() {
                if stream.index() == self.stream_index {
                    next_packet = Some(packet);
                    break;
                }
            }

            match next_packet {
                Some(packet) => {
                    // Corrupt packets are skipped; the decoder resyncs on the
                    // next keyframe.
                    if let Err(error) = self.decoder.send_packet(&packet) {
                        log::debug!("Skipping undecodable packet: {error}");
                    }
                }
                None => {
                    self.decoder.send_eof()?;
                    self.drained = true;
                }
            }
        }
    }

    fn convert(&mut self, decoded_frame: &VideoFrame) -> Result<RgbImage, PlayerError> {
        let mut rgb_frame = VideoFrame::empty();
        self.scaler.run(decoded_frame, &mut rgb_frame)?;

        let width = self.info.width;
        let height = self.info.height;
        let buffer = conversion::frame_to_buffer(&rgb_frame, width, height, 3);
        RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            PlayerError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })
    }
}

impl VideoSource for FfmpegSource {
    fn frame_count(&self) -> i64 {
        self.info.frame_count
    }

    fn reported_rate(&self) -> f64 {
        self.info.frames_per_second
    }

    fn seek(&mut self, frame_index: i64) -> Result<(), PlayerError> {
        let Some(input_context) = self.input_context.as_mut() else {
            return Ok(());
        };

        log::trace!("Seeking to frame {frame_index}");

        let timestamp = conversion::frame_index_to_seek_timestamp(
            frame_index,
            self.info.frames_per_second,
            self.start_time_us,
        );
        input_context.seek(timestamp, ..timestamp)?;
        self.decoder.flush();
        self.drained = false;
        self.pending = None;
        self.position = frame_index;

        // Decode forward from the keyframe until the target is reached and
        // hold that frame for the next read.
        while let Some(decoded_frame) = self.decode_next()? {
            let index = self.frame_index_of(&decoded_frame).unwrap_or(frame_index);
            if index >= frame_index {
                self.position = index;
                self.pending = Some((index, decoded_frame));
                break;
            }
        }

        Ok(())
    }

    fn position(&self) -> i64 {
        self.position
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, PlayerError> {
        if self.input_context.is_none() {
            return Ok(None);
        }

        let (index, decoded_frame) = match self.pending.take() {
            Some(pending) => pending,
            None => match self.decode_next()? {
                Some(decoded_frame) => {
                    let index = self
                        .frame_index_of(&decoded_frame)
                        .unwrap_or(self.position);
                    (index, decoded_frame)
                }
                None => return Ok(None),
            },
        };

        let image = self.convert(&decoded_frame)?;
        self.position = index + 1;
        Ok(Some(Frame::new(index, image)))
    }

    fn release(&mut self) {
        if self.input_context.take().is_some() {
            log::debug!("Released video: {}", self.file_path.display());
        }
        self.pending = None;
    }
}
