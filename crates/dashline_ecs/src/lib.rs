//! Entity-component-system core for dashline.
//!
//! This crate provides:
//! - [`EntityRegistry`] - Generational entity allocation and signatures
//! - [`ComponentArray`] / [`ComponentRegistry`] - Packed, type-erased component storage
//! - [`System`] / [`SystemRegistry`] - Signature-matched systems with lifecycle hooks
//! - [`World`] - The facade tying them together, with deep snapshots

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod config;
pub mod context;
pub mod entity;
pub mod system;
pub mod world;

pub use component::{Component, ComponentArray, ComponentColumn, ComponentRegistry};
pub use config::WorldConfig;
pub use context::SystemContext;
pub use entity::EntityRegistry;
pub use system::{MembershipChange, System, SystemObject, SystemRegistry};
pub use world::World;

pub use dashline_foundation::{
    ComponentType, Entity, EntitySet, Error, ErrorKind, Event, Result, Signature, Timestep,
};
