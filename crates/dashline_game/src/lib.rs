//! The platformer built on dashline.
//!
//! This crate provides:
//! - [`PlayerState`] / [`GameObject`] - Game components
//! - [`GameLogicSystem`], [`CameraSystem`], [`GameRenderSystem`] - Game systems
//! - [`creator`] - Object creators and the demo level
//! - [`CheckpointHistory`] - Ring buffer of world snapshots
//! - [`GameLayer`] - Runs the world and rewinds it on death

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod camera;
pub mod components;
pub mod config;
pub mod creator;
pub mod history;
pub mod layer;
pub mod logic;
pub mod render;

pub use camera::CameraSystem;
pub use components::{GameMode, GameObject, ObjectKind, PlayerState, register_game_components};
pub use config::GameConfig;
pub use creator::{
    Level, build_demo_level, create_checkpoint, create_ground, create_player, create_square,
    create_triangle,
};
pub use history::{Checkpoint, CheckpointHistory, CheckpointReason};
pub use layer::{GameLayer, GameStats};
pub use logic::GameLogicSystem;
pub use render::GameRenderSystem;
