//! Core identifiers, signatures, timing, events, and errors for dashline.
//!
//! This crate provides:
//! - [`Entity`] - Generational entity identifiers
//! - [`Signature`] / [`ComponentType`] - Component-kind bitsets
//! - [`Timestep`] - Frame delta time
//! - [`Event`] - Input and window events routed to systems
//! - [`EntitySet`] - Ordered persistent entity set
//! - [`Error`] - Error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod entity;
pub mod error;
pub mod event;
pub mod signature;
pub mod time;

pub use collections::EntitySet;
pub use entity::Entity;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use event::{Event, KeyCode};
pub use signature::{ComponentType, Signature};
pub use time::Timestep;

/// Maximum number of simultaneously live entities in one world.
pub const MAX_ENTITIES: usize = 5000;

/// Maximum number of distinct component kinds in one world.
///
/// This is the bit width of [`Signature`].
pub const MAX_COMPONENTS: usize = 32;
