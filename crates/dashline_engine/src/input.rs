//! Keyboard state fed from events.

use std::fmt;

use dashline_foundation::{Event, KeyCode};

/// Which keys are currently held.
///
/// A small `Copy` value, so a layer can hand the current state to every
/// system that polls input before each frame.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct InputState {
    held: u16,
}

impl InputState {
    /// No keys held.
    #[must_use]
    pub const fn new() -> Self {
        Self { held: 0 }
    }

    const fn bit(key: KeyCode) -> u16 {
        1 << key as u16
    }

    /// Marks `key` as held.
    pub fn press(&mut self, key: KeyCode) {
        self.held |= Self::bit(key);
    }

    /// Marks `key` as released.
    pub fn release(&mut self, key: KeyCode) {
        self.held &= !Self::bit(key);
    }

    /// Releases every key.
    pub fn clear(&mut self) {
        self.held = 0;
    }

    /// Checks if `key` is held.
    #[must_use]
    pub const fn is_pressed(&self, key: KeyCode) -> bool {
        self.held & Self::bit(key) != 0
    }

    /// Applies a keyboard event. Returns true if the state changed.
    pub fn on_event(&mut self, event: &Event) -> bool {
        let before = self.held;
        match *event {
            Event::KeyPressed { key, .. } => self.press(key),
            Event::KeyReleased { key } => self.release(key),
            Event::MouseScrolled { .. } | Event::WindowResized { .. } => {}
        }
        before != self.held
    }

    /// Iterates held keys.
    pub fn pressed(&self) -> impl Iterator<Item = KeyCode> + '_ {
        KeyCode::ALL
            .into_iter()
            .filter(|&key| self.is_pressed(key))
    }

    /// Returns true if nothing is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.held == 0
    }
}

impl fmt::Debug for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.pressed()).finish()
    }
}
