//! Simple force integration.

use dashline_ecs::{Result, Signature, System, SystemContext, Timestep, World};

use crate::components::{Gravity, RigidBody, Transform};

/// Integrates movable rigid bodies under their gravity force.
///
/// Per step: `a = F / m`, `v += a * dt`, `p += v * dt`.
#[derive(Clone, Debug, Default)]
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// The components this system requires.
    ///
    /// # Errors
    ///
    /// Fails if the engine components are not registered.
    pub fn signature(world: &World) -> Result<Signature> {
        Ok(Signature::of(&[
            world.component_type::<Gravity>()?,
            world.component_type::<RigidBody>()?,
            world.component_type::<Transform>()?,
        ]))
    }
}

impl System for PhysicsSystem {
    fn on_update(&mut self, ctx: &mut SystemContext<'_>, ts: Timestep) -> Result<()> {
        let dt = ts.seconds();
        for entity in &ctx.members() {
            let force = ctx.component::<Gravity>(entity)?.force;

            let body = ctx.component_mut::<RigidBody>(entity)?;
            if !body.movable || body.mass == 0.0 {
                continue;
            }
            body.acceleration = force / body.mass;
            body.velocity += body.acceleration * dt;
            let velocity = body.velocity;

            ctx.component_mut::<Transform>(entity)?.position += velocity * dt;
        }
        Ok(())
    }
}
