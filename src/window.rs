//! SDL2 window and keyboard backend.
//!
//! [`SdlWindow`] streams RGB frames into a texture stretched over the
//! window, with the status line drawn into the top-left corner of the
//! picture by [`draw_overlay`](crate::overlay::draw_overlay). [`SdlInput`] turns the
//! SDL event queue into [`InputEvent`]s; closing the window is reported as
//! [`InputEvent::Shutdown`].
//!
//! Both are built from the same [`sdl2::Sdl`] context:
//!
//! ```no_run
//! use framescrub::{SdlInput, SdlWindow};
//!
//! let sdl = sdl2::init()?;
//! let window = SdlWindow::new(&sdl)?;
//! let input = SdlInput::new(&sdl)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use sdl2::{
    EventPump, Sdl, VideoSubsystem,
    event::Event,
    keyboard::Keycode,
    pixels::PixelFormatEnum,
    render::{Canvas, Texture, TextureCreator},
    video::{FullscreenType, Window, WindowContext, WindowPos},
};

use crate::{
    error::PlayerError,
    overlay::draw_overlay,
    render::{InputEvent, InputSource, Renderer, WindowPlacement},
    source::Frame,
};

/// Window size used until the first frame arrives.
const INITIAL_SIZE: (u32, u32) = (640, 480);

fn render_error(error: impl ToString) -> PlayerError {
    PlayerError::RenderError(error.to_string())
}

/// Streaming texture reused while the frame size stays the same.
struct FrameTexture {
    texture: Texture,
    size: (u32, u32),
}

/// SDL2 implementation of [`Renderer`].
///
/// A texture only exists while its canvas does; it is destroyed before the
/// canvas is dropped or replaced.
pub struct SdlWindow {
    video: VideoSubsystem,
    canvas: Option<Canvas<Window>>,
    texture_creator: Option<TextureCreator<WindowContext>>,
    texture: Option<FrameTexture>,
    title: String,
    placement: Option<WindowPlacement>,
    frame_size: Option<(u32, u32)>,
    full_screen: bool,
}

impl SdlWindow {
    /// Initialise the SDL video subsystem. The window itself is created by
    /// [`Renderer::create_window`].
    pub fn new(sdl: &Sdl) -> Result<Self, PlayerError> {
        let video = sdl.video().map_err(render_error)?;
        Ok(Self {
            video,
            canvas: None,
            texture_creator: None,
            texture: None,
            title: String::new(),
            placement: None,
            frame_size: None,
            full_screen: false,
        })
    }

    /// Resize the window to the frame when no fixed size is configured.
    fn fit_to_frame(&mut self, width: u32, height: u32) -> Result<(), PlayerError> {
        let fixed = self.placement.and_then(|placement| placement.fixed_size);
        if fixed.is_some() || self.full_screen || self.frame_size == Some((width, height)) {
            return Ok(());
        }
        if let Some(canvas) = self.canvas.as_mut() {
            canvas
                .window_mut()
                .set_size(width, height)
                .map_err(render_error)?;
        }
        self.frame_size = Some((width, height));
        Ok(())
    }

    /// Make sure a texture of `width` x `height` exists, replacing the
    /// current one only when the size changed.
    fn ensure_texture(&mut self, width: u32, height: u32) -> Result<(), PlayerError> {
        let current_size = self.texture.as_ref().map(|current| current.size);
        if !texture_needs_replacing(current_size, (width, height)) {
            return Ok(());
        }
        self.destroy_texture();

        let Some(texture_creator) = self.texture_creator.as_ref() else {
            return Err(render_error("window has not been created"));
        };
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, width, height)
            .map_err(render_error)?;

        log::debug!("Allocated {width}x{height} frame texture");
        self.texture = Some(FrameTexture {
            texture,
            size: (width, height),
        });
        Ok(())
    }

    fn destroy_texture(&mut self) {
        if let Some(current) = self.texture.take() {
            // SAFETY: the canvas whose renderer created this texture is still
            // alive; textures are always destroyed before the canvas goes.
            unsafe { current.texture.destroy() };
        }
    }
}

impl Renderer for SdlWindow {
    fn create_window(
        &mut self,
        title: &str,
        placement: WindowPlacement,
    ) -> Result<(), PlayerError> {
        let (width, height) = placement.fixed_size.unwrap_or(INITIAL_SIZE);
        let (x, y) = placement.position;

        let window = self
            .video
            .window(title, width, height)
            .position(x, y)
            .resizable()
            .build()
            .map_err(render_error)?;
        let canvas = window.into_canvas().build().map_err(render_error)?;

        self.destroy_texture();
        log::debug!("Created window \"{title}\" at ({x}, {y}), {width}x{height}");

        self.texture_creator = Some(canvas.texture_creator());
        self.canvas = Some(canvas);
        self.title = title.to_string();
        self.placement = Some(placement);
        self.frame_size = None;
        self.full_screen = false;
        Ok(())
    }

    fn show(&mut self, frame: &Frame, overlay: &str) -> Result<(), PlayerError> {
        let (width, height) = frame.image.dimensions();
        self.fit_to_frame(width, height)?;
        self.ensure_texture(width, height)?;

        let mut picture = frame.image.clone();
        draw_overlay(&mut picture, overlay);

        let (Some(canvas), Some(current)) = (self.canvas.as_mut(), self.texture.as_mut()) else {
            return Err(render_error("window has not been created"));
        };

        current
            .texture
            .update(None, picture.as_raw(), width as usize * 3)
            .map_err(render_error)?;

        canvas.clear();
        canvas
            .copy(&current.texture, None, None)
            .map_err(render_error)?;
        canvas.present();
        Ok(())
    }

    fn set_full_screen(&mut self, full_screen: bool) -> Result<(), PlayerError> {
        let Some(canvas) = self.canvas.as_mut() else {
            return Err(render_error("window has not been created"));
        };

        let window = canvas.window_mut();
        if full_screen {
            window
                .set_fullscreen(FullscreenType::Desktop)
                .map_err(render_error)?;
        } else {
            window
                .set_fullscreen(FullscreenType::Off)
                .map_err(render_error)?;
            if let Some(placement) = self.placement {
                let (x, y) = placement.position;
                window.set_position(WindowPos::Positioned(x), WindowPos::Positioned(y));
            }
            // Re-fit on the next frame.
            self.frame_size = None;
        }

        log::debug!("Full screen: {full_screen}");
        self.full_screen = full_screen;
        Ok(())
    }

    fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    fn destroy_window(&mut self) {
        self.destroy_texture();
        self.texture_creator = None;
        if self.canvas.take().is_some() {
            log::debug!("Destroyed window \"{}\"", self.title);
        }
        self.full_screen = false;
    }
}

/// A texture is allocated for the first frame and again on every size change.
fn texture_needs_replacing(current: Option<(u32, u32)>, wanted: (u32, u32)) -> bool {
    current != Some(wanted)
}

/// SDL2 implementation of [`InputSource`], yielding [`Keycode`]s.
pub struct SdlInput {
    events: EventPump,
}

impl SdlInput {
    /// Take the context's event pump. SDL allows only one at a time.
    pub fn new(sdl: &Sdl) -> Result<Self, PlayerError> {
        let events = sdl.event_pump().map_err(render_error)?;
        Ok(Self { events })
    }
}

impl InputSource for SdlInput {
    type Code = Keycode;

    /// Wait up to `timeout_ms` for the first event, then drain pending events
    /// until a key press or a quit request turns up.
    fn poll_code(&mut self, timeout_ms: u32) -> InputEvent<Keycode> {
        let mut next = if timeout_ms == 0 {
            self.events.poll_event()
        } else {
            self.events.wait_event_timeout(timeout_ms)
        };

        while let Some(event) = next {
            match event {
                Event::Quit { .. } => return InputEvent::Shutdown,
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => return InputEvent::Key(keycode),
                _ => {}
            }
            next = self.events.poll_event();
        }

        InputEvent::NoInput
    }
}
