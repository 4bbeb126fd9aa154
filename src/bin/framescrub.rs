use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use ffmpeg_next::util::log::Level as FfmpegLogLevel;
use framescrub::{
    Command, CommandMapper, FfmpegSource, Frame, FrameWriter, ImageFileWriter, PlaybackSession,
    PlayerError, PlayerOptions, SdlInput, SdlWindow, VideoInfo,
};

/// Key labels and the command they trigger, in help-screen order.
const CONTROLS: &[(&str, Command)] = &[
    ("Space", Command::TogglePause),
    ("f", Command::ToggleFullScreen),
    ("Left", Command::JumpBack100),
    ("Right", Command::JumpFwd100),
    ("[", Command::JumpBack10),
    ("]", Command::JumpFwd10),
    (",", Command::StepBack1),
    (".", Command::StepFwd1),
    ("Home", Command::GoHome),
    ("End", Command::GoEnd),
    ("Up", Command::SpeedUp),
    ("Down", Command::SpeedDown),
    ("0 (zero)", Command::ResetSpeed),
    ("c", Command::Capture),
    ("Esc", Command::Quit),
];

#[derive(Debug, Parser)]
#[command(
    name = "framescrub",
    version,
    about = "Play a video with precise frame selection"
)]
struct Cli {
    /// Video file to play.
    video_file: PathBuf,
}

/// Prints each saved capture as it happens. Failures reach the terminal as
/// log warnings from the session.
struct ReportingWriter<W> {
    inner: W,
}

impl<W: FrameWriter> FrameWriter for ReportingWriter<W> {
    fn write_frame(&mut self, path: &Path, frame: &Frame) -> Result<(), PlayerError> {
        self.inner.write_frame(path, frame)?;
        println!("{}", capture_report(path));
        Ok(())
    }
}

fn capture_report(path: &Path) -> String {
    format!(">> Image captured to {}", path.display())
        .green()
        .to_string()
}

fn print_video_info(info: &VideoInfo) {
    println!("{}", "=== Video info ===".bold());
    println!("{info}");
}

fn print_controls() {
    println!();
    println!("{}", "=== Controls ===".bold());
    for (key, command) in CONTROLS {
        println!("{key:<12} : {command}");
    }
    println!();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Captures are reported by `ReportingWriter`; the log only adds warnings
    // unless RUST_LOG asks for more.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    // FFmpeg's own warnings are noisy while seeking.
    ffmpeg_next::util::log::set_level(FfmpegLogLevel::Error);

    let source = FfmpegSource::open(&cli.video_file)?;
    print_video_info(source.info());
    print_controls();

    let sdl = sdl2::init()?;
    let renderer = SdlWindow::new(&sdl)?;
    let input = SdlInput::new(&sdl)?;

    let title = cli.video_file.display().to_string();
    let session = PlaybackSession::new(
        title,
        source,
        renderer,
        input,
        ReportingWriter {
            inner: ImageFileWriter,
        },
        CommandMapper::sdl(),
        PlayerOptions::default(),
    )?;
    let summary = session.run()?;

    if !summary.captures.is_empty() || summary.failed_captures > 0 {
        println!(
            "{} {} capture(s), {} failed",
            "saved".green().bold(),
            summary.captures.len(),
            summary.failed_captures
        );
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn missing_video_argument_is_rejected() {
        assert!(Cli::try_parse_from(["framescrub"]).is_err());
        let cli = Cli::try_parse_from(["framescrub", "clip.mp4"]).unwrap();
        assert_eq!(cli.video_file, PathBuf::from("clip.mp4"));
    }

    #[test]
    fn capture_report_names_the_file() {
        colored::control::set_override(false);
        let path = Path::new("shots").join("cap03.png");

        assert_eq!(
            capture_report(&path),
            format!(">> Image captured to {}", path.display())
        );
    }

    #[test]
    fn reporting_writer_passes_results_through() {
        let directory = tempfile::tempdir().expect("Failed to create temp dir");
        let mut writer = ReportingWriter {
            inner: ImageFileWriter,
        };
        let frame = Frame::new(0, image::RgbImage::new(4, 4));

        let path = directory.path().join("cap00.png");
        writer.write_frame(&path, &frame).unwrap();
        assert!(path.exists());

        let missing = directory.path().join("missing").join("cap01.png");
        assert!(matches!(
            writer.write_frame(&missing, &frame),
            Err(PlayerError::CaptureWrite { .. })
        ));
    }

    #[test]
    fn every_listed_control_is_bound() {
        let mapper = CommandMapper::sdl();
        for (key, command) in CONTROLS {
            assert!(
                mapper.codes_for(*command).next().is_some(),
                "{key} lists an unbound command"
            );
        }
    }
}
