//! Console commands.

use dashline_foundation::KeyCode;
use thiserror::Error;

/// Frames run by a bare `step`.
pub const DEFAULT_STEP: u32 = 1;

/// Checkpoints listed by a bare `history`.
pub const DEFAULT_HISTORY: usize = 5;

/// A parsed console line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    /// Run this many frames.
    Step(u32),
    /// Hold a key down.
    Press(KeyCode),
    /// Let go of a key.
    Release(KeyCode),
    /// Save a checkpoint now.
    Checkpoint,
    /// Go back to the latest checkpoint.
    Rewind,
    /// Go back to the checkpoint saved on this frame, dropping later ones.
    RewindTo(u64),
    /// List the newest checkpoints.
    History(usize),
    /// Drop all checkpoints and go back to the level start.
    Restart,
    /// Scroll the mouse wheel by this many notches.
    Scroll(f32),
    /// Resize the viewport.
    Resize(u32, u32),
    /// Print frame, player, and counters.
    Status,
    /// List live entities and their components.
    Entities,
    /// Print the command list.
    Help,
    /// Leave the console.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// First word is not a command.
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    /// Key name not recognized.
    #[error("unknown key: {0}")]
    UnknownKey(String),

    /// Wrong number or shape of arguments.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// A numeric argument did not parse.
    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

impl Command {
    /// Every command word, in help order.
    pub const NAMES: [&'static str; 13] = [
        "step",
        "press",
        "release",
        "checkpoint",
        "rewind",
        "history",
        "restart",
        "scroll",
        "resize",
        "status",
        "entities",
        "help",
        "quit",
    ];

    /// Parses one console line.
    ///
    /// Blank lines and `#` comments parse to `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] describing what is wrong with the line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.split('#').next().unwrap_or_default();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("step" | "s", []) => Self::Step(DEFAULT_STEP),
            ("step" | "s", [count]) => Self::Step(number(count)?),
            ("step" | "s", _) => return Err(CommandError::Usage("step [frames]")),
            ("press", [key]) => Self::Press(key_code(key)?),
            ("press", _) => return Err(CommandError::Usage("press <key>")),
            ("release", [key]) => Self::Release(key_code(key)?),
            ("release", _) => return Err(CommandError::Usage("release <key>")),
            ("checkpoint", []) => Self::Checkpoint,
            ("rewind", []) => Self::Rewind,
            ("rewind", [frame]) => Self::RewindTo(number(frame)?),
            ("rewind", _) => return Err(CommandError::Usage("rewind [frame]")),
            ("history", []) => Self::History(DEFAULT_HISTORY),
            ("history", [count]) => Self::History(number(count)?),
            ("history", _) => return Err(CommandError::Usage("history [count]")),
            ("restart", []) => Self::Restart,
            ("scroll", [notches]) => Self::Scroll(number(notches)?),
            ("scroll", _) => return Err(CommandError::Usage("scroll <notches>")),
            ("resize", [width, height]) => Self::Resize(number(width)?, number(height)?),
            ("resize", _) => return Err(CommandError::Usage("resize <width> <height>")),
            ("status", []) => Self::Status,
            ("entities", []) => Self::Entities,
            ("help" | "?", _) => Self::Help,
            ("quit" | "exit" | "q", []) => Self::Quit,
            ("checkpoint" | "restart" | "status" | "entities" | "quit" | "exit" | "q", _) => {
                return Err(CommandError::Usage("this command takes no arguments"));
            }
            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }

    /// One line per command, for `help`.
    #[must_use]
    pub fn help() -> &'static str {
        "\
step [frames]          run frames (default 1)
press <key>            hold a key (space, left, right, a, d, w, s, q, e, x, z)
release <key>          let go of a key
checkpoint             save a checkpoint now
rewind [frame]         restore the latest checkpoint, or the one saved on frame
history [count]        list the newest checkpoints (default 5)
restart                clear checkpoints and restart the level
scroll <notches>       zoom the camera
resize <w> <h>         resize the viewport
status                 frame, player, and counters
entities               live entities and their components
help                   this list
quit                   leave"
    }
}

fn key_code(name: &str) -> Result<KeyCode, CommandError> {
    KeyCode::from_name(name).ok_or_else(|| CommandError::UnknownKey(name.to_string()))
}

fn number<T: std::str::FromStr>(text: &str) -> Result<T, CommandError> {
    text.parse()
        .map_err(|_| CommandError::InvalidNumber(text.to_string()))
}
