//! Default registrations for a fresh world.

use dashline_ecs::{Result, World};

use crate::components::{Colored, Drawable, Gravity, Health, RigidBody, Textured, Transform};
use crate::physics::PhysicsSystem;
use crate::render::RenderSystem;

/// Registers every engine component, always in the same order.
///
/// # Errors
///
/// Fails if any of them is already registered.
pub fn register_engine_components(world: &mut World) -> Result<()> {
    world.register_component::<Gravity>()?;
    world.register_component::<Transform>()?;
    world.register_component::<RigidBody>()?;
    world.register_component::<Colored>()?;
    world.register_component::<Textured>()?;
    world.register_component::<Drawable>()?;
    world.register_component::<Health>()?;
    Ok(())
}

/// Registers [`PhysicsSystem`] then [`RenderSystem`] with their signatures.
///
/// A game that wants different behavior deregisters either one and
/// registers its own.
///
/// # Errors
///
/// Fails if the engine components are missing or a system is already
/// registered.
pub fn register_engine_systems(world: &mut World) -> Result<()> {
    let physics = PhysicsSystem::signature(world)?;
    world.register_system_with_signature(PhysicsSystem, physics)?;
    let render = RenderSystem::signature(world)?;
    world.register_system_with_signature(RenderSystem::new(), render)?;
    Ok(())
}
