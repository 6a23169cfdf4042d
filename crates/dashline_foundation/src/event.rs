//! Input and window events routed to systems.
//!
//! Events are produced by whatever owns the window and are handed to the
//! world each frame. Systems pick out the variants they care about.

use std::fmt;

/// Keys the engine and game react to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// Pan left.
    A,
    /// Pan right.
    D,
    /// Pan up.
    W,
    /// Pan down.
    S,
    /// Rotate counter-clockwise.
    Q,
    /// Rotate clockwise.
    E,
    /// Save a checkpoint.
    X,
    /// Rewind to the last checkpoint.
    Z,
    /// Jump.
    Space,
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Escape.
    Escape,
}

impl KeyCode {
    /// Every key, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::A,
        Self::D,
        Self::W,
        Self::S,
        Self::Q,
        Self::E,
        Self::X,
        Self::Z,
        Self::Space,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Escape,
    ];

    /// Parses a key name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.name().eq_ignore_ascii_case(name))
    }

    /// Returns the key name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::D => "d",
            Self::W => "w",
            Self::S => "s",
            Self::Q => "q",
            Self::E => "e",
            Self::X => "x",
            Self::Z => "z",
            Self::Space => "space",
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
            Self::Escape => "escape",
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An input or window event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Event {
    /// A key went down (or auto-repeated).
    KeyPressed {
        /// The key.
        key: KeyCode,
        /// True for auto-repeat presses.
        repeat: bool,
    },
    /// A key went up.
    KeyReleased {
        /// The key.
        key: KeyCode,
    },
    /// The mouse wheel moved.
    MouseScrolled {
        /// Horizontal offset.
        x_offset: f32,
        /// Vertical offset.
        y_offset: f32,
    },
    /// The window was resized.
    WindowResized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
}

impl Event {
    /// Creates a non-repeating key press.
    #[must_use]
    pub const fn key_pressed(key: KeyCode) -> Self {
        Self::KeyPressed { key, repeat: false }
    }

    /// Creates a key release.
    #[must_use]
    pub const fn key_released(key: KeyCode) -> Self {
        Self::KeyReleased { key }
    }

    /// Returns the key involved, if this is a keyboard event.
    #[must_use]
    pub const fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyPressed { key, .. } | Self::KeyReleased { key } => Some(*key),
            Self::MouseScrolled { .. } | Self::WindowResized { .. } => None,
        }
    }
}
