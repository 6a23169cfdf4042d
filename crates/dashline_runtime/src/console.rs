//! The interactive console.

use std::fmt::Write as _;
use std::io::{self, Write};

use dashline_ecs::{Error, Event, Result, Timestep};
use dashline_engine::{Layer, Transform};
use dashline_game::{CheckpointReason, GameLayer, PlayerState};
use log::info;

use crate::command::Command;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};

/// Formats an error with whatever context it carries.
#[must_use]
pub fn describe(error: &Error) -> String {
    match &error.context {
        Some(context) => format!("{error} {context}"),
        None => error.to_string(),
    }
}

/// Drives a [`GameLayer`] from typed commands.
pub struct Console<E: LineEditor = RustylineEditor> {
    editor: E,
    layer: GameLayer,
    timestep: Timestep,
    show_banner: bool,
    prompt: String,
}

impl Console<RustylineEditor> {
    /// Creates a console reading from the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(layer: GameLayer, timestep: Timestep) -> Result<Self> {
        Ok(Self::with_editor(RustylineEditor::new()?, layer, timestep))
    }
}

impl<E: LineEditor> Console<E> {
    /// Creates a console with the given editor.
    pub fn with_editor(editor: E, layer: GameLayer, timestep: Timestep) -> Self {
        Self {
            editor,
            layer,
            timestep,
            show_banner: true,
            prompt: "dash> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// The driven layer.
    #[must_use]
    pub fn layer(&self) -> &GameLayer {
        &self.layer
    }

    /// Mutable access to the driven layer.
    pub fn layer_mut(&mut self) -> &mut GameLayer {
        &mut self.layer
    }

    /// The editor.
    #[must_use]
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Runs until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns the first invariant violation or I/O failure; anything else
    /// is printed and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        info!("console closed at frame {}", self.layer.world().frame());
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let line = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => return Ok(true),
            ReadResult::Eof => return Ok(false),
        };
        if line.trim().is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&line);

        let command = match Command::parse(&line) {
            Ok(Some(Command::Quit)) => return Ok(false),
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(err) => {
                eprintln!("\x1b[31m{err}\x1b[0m");
                return Ok(true);
            }
        };

        match self.execute(command) {
            Ok(Some(output)) => println!("{output}"),
            Ok(None) => {}
            Err(err) if err.is_invariant_violation() => return Err(err),
            Err(err) => eprintln!("\x1b[31mError: {}\x1b[0m", describe(&err)),
        }
        Ok(true)
    }

    /// Applies a command and returns any text to show.
    ///
    /// # Errors
    ///
    /// Propagates errors from the layer.
    pub fn execute(&mut self, command: Command) -> Result<Option<String>> {
        match command {
            Command::Step(frames) => {
                self.step(frames)?;
                Ok(Some(self.status()))
            }
            Command::Press(key) => self.send(&Event::key_pressed(key)),
            Command::Release(key) => self.send(&Event::key_released(key)),
            Command::Checkpoint => {
                if !self.layer.player_alive() {
                    return Ok(Some("the player is dead; nothing saved".to_string()));
                }
                self.layer.save_checkpoint(CheckpointReason::Manual);
                Ok(Some(format!(
                    "checkpoint saved at frame {}",
                    self.layer.world().frame()
                )))
            }
            Command::Rewind => {
                self.layer.rewind();
                Ok(Some(self.status()))
            }
            Command::RewindTo(frame) => {
                if self.layer.rewind_to(frame) {
                    Ok(Some(self.status()))
                } else {
                    Ok(Some(format!("no checkpoint saved on frame {frame}")))
                }
            }
            Command::History(count) => Ok(Some(self.history(count))),
            Command::Restart => {
                self.layer.restart();
                Ok(Some(self.status()))
            }
            Command::Scroll(notches) => self.send(&Event::MouseScrolled {
                x_offset: 0.0,
                y_offset: notches,
            }),
            Command::Resize(width, height) => self.send(&Event::WindowResized { width, height }),
            Command::Status => Ok(Some(self.status())),
            Command::Entities => Ok(Some(self.entities())),
            Command::Help => Ok(Some(Command::help().to_string())),
            Command::Quit => Ok(None),
        }
    }

    /// Runs `frames` frames at the console timestep.
    ///
    /// # Errors
    ///
    /// Stops at the first failing frame.
    pub fn step(&mut self, frames: u32) -> Result<()> {
        for _ in 0..frames {
            self.layer.on_update(self.timestep)?;
        }
        Ok(())
    }

    fn send(&mut self, event: &Event) -> Result<Option<String>> {
        self.layer.on_event(event)?;
        Ok(None)
    }

    /// One-paragraph summary of the game state.
    #[must_use]
    pub fn status(&self) -> String {
        let world = self.layer.world();
        let stats = self.layer.stats();
        let history = self.layer.history();
        let player = self.layer.player();

        let mut out = format!(
            "frame {} (ran {}), deaths {}, rewinds {}, checkpoints {}/{}",
            world.frame(),
            stats.frames,
            stats.deaths,
            stats.rewinds,
            history.len(),
            history.capacity(),
        );
        match (
            world.try_component::<Transform>(player),
            world.try_component::<PlayerState>(player),
        ) {
            (Some(transform), Some(state)) => {
                let _ = write!(
                    out,
                    "\nplayer {player} at ({:.2}, {:.2}), {}{}",
                    transform.position.x,
                    transform.position.y,
                    if state.alive { "alive" } else { "dead" },
                    if state.on_ground { ", on ground" } else { "" },
                );
            }
            _ => out.push_str("\nno player"),
        }
        let held: Vec<_> = self.layer.input().pressed().map(|key| key.name()).collect();
        if !held.is_empty() {
            let _ = write!(out, "\nholding {}", held.join(" "));
        }
        out
    }

    /// The `count` newest checkpoints, oldest first.
    #[must_use]
    pub fn history(&self, count: usize) -> String {
        let history = self.layer.history();
        let mut out = format!(
            "{} of {} checkpoints",
            history.len(),
            history.capacity()
        );
        for checkpoint in history.recent(count) {
            let _ = write!(
                out,
                "\n  frame {}: {}",
                checkpoint.frame(),
                checkpoint.reason()
            );
        }
        out
    }

    /// Every live entity with the short names of its components.
    #[must_use]
    pub fn entities(&self) -> String {
        let world = self.layer.world();
        let mut out = format!("{} live entities", world.entity_count());
        for entity in world.entities() {
            let names: Vec<&str> = world
                .signature(entity)
                .map(|signature| {
                    signature
                        .iter()
                        .filter_map(|ty| world.component_name(ty))
                        .map(short_name)
                        .collect()
                })
                .unwrap_or_default();
            let _ = write!(out, "\n  {entity}: {}", names.join(", "));
        }
        out
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mdashline {}\x1b[0m", env!("CARGO_PKG_VERSION"));
        println!("Type `help` for commands. Use Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

/// `dashline_engine::components::Transform` -> `Transform`.
fn short_name(path: &'static str) -> &'static str {
    path.rsplit("::").next().unwrap_or(path)
}
