//! Console, CLI, and batch driver for dashline.
//!
//! This crate provides:
//! - [`Console`] - Interactive command loop over a [`GameLayer`](dashline_game::GameLayer)
//! - [`Command`] - Parsed console commands
//! - [`LineEditor`] - Line editing abstraction (rustyline or scripted)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod console;
pub mod editor;

pub use command::{Command, CommandError};
pub use console::{Console, describe};
pub use editor::{LineEditor, ReadResult, RustylineEditor, ScriptedEditor};
