//! Display and input collaborators.
//!
//! The playback loop draws through [`Renderer`] and reads keys through
//! [`InputSource`]. Window lifecycle, including full-screen switching, is the
//! renderer's business; the loop only states which mode it wants.

use crate::{error::PlayerError, source::Frame};

/// Where a window is placed and how large it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlacement {
    /// Top-left corner in screen coordinates.
    pub position: (i32, i32),
    /// Fixed client size. `None` sizes the window to each frame.
    pub fixed_size: Option<(u32, u32)>,
}

/// Something that can put a frame on screen.
pub trait Renderer {
    /// Open the window.
    fn create_window(&mut self, title: &str, placement: WindowPlacement)
    -> Result<(), PlayerError>;

    /// Draw `frame` with the `overlay` status line.
    fn show(&mut self, frame: &Frame, overlay: &str) -> Result<(), PlayerError>;

    /// Enter or leave full-screen mode.
    fn set_full_screen(&mut self, full_screen: bool) -> Result<(), PlayerError>;

    /// Whether the window is currently full screen.
    fn is_full_screen(&self) -> bool;

    /// Close the window. Calling it twice is harmless.
    fn destroy_window(&mut self);
}

/// Result of polling an [`InputSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent<K> {
    /// A key was pressed.
    Key(K),
    /// Nothing arrived within the timeout.
    NoInput,
    /// The user or the platform asked the application to close.
    Shutdown,
}

/// Non-blocking source of raw key codes.
pub trait InputSource {
    /// Backend-specific key code.
    type Code;

    /// Wait up to `timeout_ms` for input.
    fn poll_code(&mut self, timeout_ms: u32) -> InputEvent<Self::Code>;
}
