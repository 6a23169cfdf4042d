//! Engine layer for dashline.
//!
//! Everything here is a consumer of the [`World`](dashline_ecs::World)
//! contract:
//! - [`components`] - Transform, physics, and drawing components
//! - [`PhysicsSystem`] / [`RenderSystem`] - The default systems
//! - [`OrthographicCamera`], [`InputState`], [`ParticleEmitter`],
//!   [`AssetRegistry`] - Services owned by whichever layer needs them
//! - [`QuadBuilder`] - Composite entity construction
//! - [`register_engine_components`] / [`register_engine_systems`] - Defaults
//! - [`Layer`] - The unit an application drives each frame

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assets;
pub mod camera;
pub mod components;
pub mod input;
pub mod layer;
pub mod particles;
pub mod physics;
pub mod quad;
pub mod render;
pub mod setup;

pub use assets::{AssetRegistry, TextureHandle};
pub use camera::OrthographicCamera;
pub use components::{
    Colored, Drawable, Gravity, Health, PrimitiveGeometry, RigidBody, Textured, Transform,
};
pub use input::InputState;
pub use layer::Layer;
pub use particles::{ParticleEmitter, ParticleProps};
pub use physics::PhysicsSystem;
pub use quad::QuadBuilder;
pub use render::{DrawCommand, DrawList, RenderSystem};
pub use setup::{register_engine_components, register_engine_systems};

pub use glam::{Mat4, Vec2, Vec3, Vec4};
