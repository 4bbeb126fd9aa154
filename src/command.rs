//! Keyboard commands and the key-code table that produces them.
//!
//! [`CommandMapper`] is generic over the backend's key type so the controller
//! and the playback loop never see platform key codes. The SDL binding table
//! used by the `framescrub` binary is available as [`CommandMapper::sdl`]
//! when the `window` feature is enabled.

use std::{collections::HashMap, fmt, hash::Hash};

/// A symbolic playback action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Command {
    /// Pause or resume auto-advance.
    TogglePause,
    /// Move back 100 frames.
    JumpBack100,
    /// Move forward 100 frames.
    JumpFwd100,
    /// Move back 10 frames and pause.
    JumpBack10,
    /// Move forward 10 frames and pause.
    JumpFwd10,
    /// Move back one frame and pause.
    StepBack1,
    /// Move forward one frame and pause.
    StepFwd1,
    /// Halve the inter-frame delay.
    SpeedUp,
    /// Double the inter-frame delay.
    SpeedDown,
    /// Restore the delay matching the source frame rate.
    ResetSpeed,
    /// Jump to the first frame and pause.
    GoHome,
    /// Jump to the last frame and pause.
    GoEnd,
    /// Write the displayed frame to disk.
    Capture,
    /// Switch between windowed and full-screen mode.
    ToggleFullScreen,
    /// End the session.
    Quit,
    /// No actionable input this tick.
    #[default]
    None,
}

impl Command {
    /// Short human-readable description, used by the help screen.
    pub fn description(self) -> &'static str {
        match self {
            Command::TogglePause => "Pause / resume",
            Command::JumpBack100 => "Frame -100",
            Command::JumpFwd100 => "Frame +100",
            Command::JumpBack10 => "Frame -10",
            Command::JumpFwd10 => "Frame +10",
            Command::StepBack1 => "Frame -1",
            Command::StepFwd1 => "Frame +1",
            Command::SpeedUp => "Increase playback speed",
            Command::SpeedDown => "Decrease playback speed",
            Command::ResetSpeed => "Reset speed to 100%",
            Command::GoHome => "First frame",
            Command::GoEnd => "Last frame",
            Command::Capture => "Capture the current frame into a file",
            Command::ToggleFullScreen => "Toggle full screen",
            Command::Quit => "Quit",
            Command::None => "No action",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Translates raw key codes into [`Command`]s.
///
/// # Example
///
/// ```
/// use framescrub::{Command, CommandMapper};
///
/// let mapper = CommandMapper::new()
///     .with_binding(' ', Command::TogglePause)
///     .with_binding('q', Command::Quit);
///
/// assert_eq!(mapper.map(Some(' ')), Command::TogglePause);
/// assert_eq!(mapper.map(Some('x')), Command::None);
/// assert_eq!(mapper.map(None), Command::None);
/// ```
#[derive(Debug, Clone)]
pub struct CommandMapper<K> {
    table: HashMap<K, Command>,
}

impl<K: Eq + Hash> CommandMapper<K> {
    /// Create a mapper with no bindings.
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Create a mapper from `(code, command)` pairs. Later pairs win.
    pub fn from_bindings<I>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, Command)>,
    {
        Self {
            table: bindings.into_iter().collect(),
        }
    }

    /// Bind `code` to `command`, returning the previous binding.
    pub fn bind(&mut self, code: K, command: Command) -> Option<Command> {
        self.table.insert(code, command)
    }

    /// Builder form of [`bind`](Self::bind).
    #[must_use]
    pub fn with_binding(mut self, code: K, command: Command) -> Self {
        self.bind(code, command);
        self
    }

    /// Map a polled code. `None` (no input) and unknown codes give
    /// [`Command::None`].
    pub fn map(&self, code: Option<K>) -> Command {
        code.and_then(|code| self.table.get(&code).copied())
            .unwrap_or(Command::None)
    }

    /// All codes bound to `command`.
    pub fn codes_for(&self, command: Command) -> impl Iterator<Item = &K> {
        self.table
            .iter()
            .filter(move |(_, bound)| **bound == command)
            .map(|(code, _)| code)
    }

    /// Iterate over every binding.
    pub fn bindings(&self) -> impl Iterator<Item = (&K, &Command)> {
        self.table.iter()
    }
}

impl<K: Eq + Hash> Default for CommandMapper<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "window")]
impl CommandMapper<sdl2::keyboard::Keycode> {
    /// The default SDL key table.
    ///
    /// | Key | Command |
    /// |-----|---------|
    /// | Space | pause / resume |
    /// | Left / Right | -100 / +100 |
    /// | `[` / `]` | -10 / +10 |
    /// | `,` / `.` | -1 / +1 |
    /// | Up / Down | faster / slower |
    /// | `0` | reset speed |
    /// | Home / End | first / last frame |
    /// | `c` | capture |
    /// | `f` | full screen |
    /// | Esc | quit |
    pub fn sdl() -> Self {
        use sdl2::keyboard::Keycode;

        Self::from_bindings([
            (Keycode::Space, Command::TogglePause),
            (Keycode::Left, Command::JumpBack100),
            (Keycode::Right, Command::JumpFwd100),
            (Keycode::LeftBracket, Command::JumpBack10),
            (Keycode::RightBracket, Command::JumpFwd10),
            (Keycode::Comma, Command::StepBack1),
            (Keycode::Period, Command::StepFwd1),
            (Keycode::Up, Command::SpeedUp),
            (Keycode::Down, Command::SpeedDown),
            (Keycode::Num0, Command::ResetSpeed),
            (Keycode::Kp0, Command::ResetSpeed),
            (Keycode::Home, Command::GoHome),
            (Keycode::End, Command::GoEnd),
            (Keycode::C, Command::Capture),
            (Keycode::F, Command::ToggleFullScreen),
            (Keycode::Escape, Command::Quit),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows_codes() -> CommandMapper<i32> {
        CommandMapper::from_bindings([
            (32, Command::TogglePause),
            (2_424_832, Command::JumpBack100),
            (2_555_904, Command::JumpFwd100),
            (27, Command::Quit),
        ])
    }

    #[test]
    fn known_codes_map() {
        let mapper = windows_codes();
        assert_eq!(mapper.map(Some(32)), Command::TogglePause);
        assert_eq!(mapper.map(Some(2_555_904)), Command::JumpFwd100);
        assert_eq!(mapper.map(Some(27)), Command::Quit);
    }

    #[test]
    fn unknown_and_missing_codes_are_none() {
        let mapper = windows_codes();
        assert_eq!(mapper.map(Some(-1)), Command::None);
        assert_eq!(mapper.map(Some(12345)), Command::None);
        assert_eq!(mapper.map(None), Command::None);
    }

    #[test]
    fn rebinding_replaces_previous_command() {
        let mut mapper = windows_codes();
        let previous = mapper.bind(32, Command::Capture);
        assert_eq!(previous, Some(Command::TogglePause));
        assert_eq!(mapper.map(Some(32)), Command::Capture);
    }

    #[test]
    fn codes_for_lists_every_binding() {
        let mapper = CommandMapper::new()
            .with_binding('0', Command::ResetSpeed)
            .with_binding('r', Command::ResetSpeed)
            .with_binding('q', Command::Quit);
        let mut codes: Vec<char> = mapper.codes_for(Command::ResetSpeed).copied().collect();
        codes.sort_unstable();
        assert_eq!(codes, vec!['0', 'r']);
    }

    #[cfg(feature = "window")]
    #[test]
    fn sdl_table_covers_every_command() {
        let mapper = CommandMapper::sdl();
        let commands = [
            Command::TogglePause,
            Command::JumpBack100,
            Command::JumpFwd100,
            Command::JumpBack10,
            Command::JumpFwd10,
            Command::StepBack1,
            Command::StepFwd1,
            Command::SpeedUp,
            Command::SpeedDown,
            Command::ResetSpeed,
            Command::GoHome,
            Command::GoEnd,
            Command::Capture,
            Command::ToggleFullScreen,
            Command::Quit,
        ];
        for command in commands {
            assert!(
                mapper.codes_for(command).next().is_some(),
                "{command:?} has no key"
            );
        }
    }
}
