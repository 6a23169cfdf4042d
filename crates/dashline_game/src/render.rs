//! Game renderer.

use dashline_ecs::{Result, Signature, System, SystemContext, Timestep, World};
use dashline_engine::{
    Colored, DrawCommand, DrawList, Drawable, PrimitiveGeometry, Textured, Transform,
};
use glam::Vec4;

/// Draws every Transform + Drawable entity.
///
/// Unlike the engine renderer it does not require `Colored`: textured
/// objects without a color are drawn with a white tint, untextured ones in
/// white.
#[derive(Clone, Debug, Default)]
pub struct GameRenderSystem {
    draw_list: DrawList,
}

impl GameRenderSystem {
    /// Creates a renderer with an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The components this system requires.
    ///
    /// # Errors
    ///
    /// Fails if Transform or Drawable are not registered.
    pub fn signature(world: &World) -> Result<Signature> {
        Ok(Signature::of(&[
            world.component_type::<Transform>()?,
            world.component_type::<Drawable>()?,
        ]))
    }

    /// Commands from the last frame, in entity order.
    #[must_use]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }
}

impl System for GameRenderSystem {
    fn on_update(&mut self, ctx: &mut SystemContext<'_>, _ts: Timestep) -> Result<()> {
        self.draw_list.clear();
        for entity in &ctx.members() {
            let transform = ctx.component::<Transform>(entity)?;
            let color = ctx
                .try_component::<Colored>(entity)
                .map_or(Vec4::ONE, |c| c.color);
            let command = match ctx.component::<Drawable>(entity)?.geometry {
                PrimitiveGeometry::Quad => {
                    DrawCommand::quad(transform, color, ctx.try_component::<Textured>(entity))
                }
                PrimitiveGeometry::Triangle => DrawCommand::Triangle {
                    position: transform.position,
                    size: transform.size,
                    rotation: transform.rotation,
                    color,
                },
            };
            self.draw_list.push(command);
        }
        Ok(())
    }
}
