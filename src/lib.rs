//! dashline - 2D platformer on a small ECS with checkpoint rollback
//!
//! This crate re-exports all layers of the dashline system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: dashline_runtime   : Console, CLI, batch runs
//! Layer 3: dashline_game      : Platformer systems, level, checkpoint rewind
//! Layer 2: dashline_engine    : Engine components, physics, rendering, particles
//! Layer 1: dashline_ecs       : Entities, component storage, systems, World
//! Layer 0: dashline_foundation: Core types (Entity, Signature, Event, Error)
//! ```

pub use dashline_ecs as ecs;
pub use dashline_engine as engine;
pub use dashline_foundation as foundation;
pub use dashline_game as game;
pub use dashline_runtime as runtime;
