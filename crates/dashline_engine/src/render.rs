//! Draw command generation.
//!
//! Rendering here stops at a list of commands. Whatever owns a graphics
//! context replays the [`DrawList`] after the frame.

use dashline_ecs::{Result, Signature, System, SystemContext, Timestep, World};
use glam::{Vec2, Vec3, Vec4};

use crate::assets::TextureHandle;
use crate::components::{Colored, Drawable, PrimitiveGeometry, Textured, Transform};

/// One primitive to draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned solid quad.
    Quad {
        /// Center.
        position: Vec3,
        /// Width and height.
        size: Vec2,
        /// Fill color.
        color: Vec4,
    },
    /// Rotated solid quad.
    RotatedQuad {
        /// Center.
        position: Vec3,
        /// Width and height.
        size: Vec2,
        /// Degrees.
        rotation: f32,
        /// Fill color.
        color: Vec4,
    },
    /// Axis-aligned textured quad.
    TexturedQuad {
        /// Center.
        position: Vec3,
        /// Width and height.
        size: Vec2,
        /// Texture to sample.
        texture: TextureHandle,
        /// Texture repeat count.
        tiling_factor: f32,
        /// Multiplied with the texture.
        tint: Vec4,
    },
    /// Rotated textured quad.
    RotatedTexturedQuad {
        /// Center.
        position: Vec3,
        /// Width and height.
        size: Vec2,
        /// Degrees.
        rotation: f32,
        /// Texture to sample.
        texture: TextureHandle,
        /// Texture repeat count.
        tiling_factor: f32,
        /// Multiplied with the texture.
        tint: Vec4,
    },
    /// Solid triangle inscribed in the transform box.
    Triangle {
        /// Center.
        position: Vec3,
        /// Width and height.
        size: Vec2,
        /// Degrees.
        rotation: f32,
        /// Fill color.
        color: Vec4,
    },
}

impl DrawCommand {
    /// Picks the quad variant matching the transform and optional texture.
    #[must_use]
    pub fn quad(transform: &Transform, color: Vec4, textured: Option<&Textured>) -> Self {
        let Transform {
            position,
            size,
            rotation,
        } = *transform;

        match (rotation == 0.0, textured) {
            (true, None) => Self::Quad {
                position,
                size,
                color,
            },
            (false, None) => Self::RotatedQuad {
                position,
                size,
                rotation,
                color,
            },
            (true, Some(t)) => Self::TexturedQuad {
                position,
                size,
                texture: t.texture,
                tiling_factor: t.tiling_factor,
                tint: color,
            },
            (false, Some(t)) => Self::RotatedTexturedQuad {
                position,
                size,
                rotation,
                texture: t.texture,
                tiling_factor: t.tiling_factor,
                tint: color,
            },
        }
    }

    /// Center of the primitive.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        match *self {
            Self::Quad { position, .. }
            | Self::RotatedQuad { position, .. }
            | Self::TexturedQuad { position, .. }
            | Self::RotatedTexturedQuad { position, .. }
            | Self::Triangle { position, .. } => position,
        }
    }

    /// The texture sampled, if any.
    #[must_use]
    pub fn texture(&self) -> Option<TextureHandle> {
        match *self {
            Self::TexturedQuad { texture, .. } | Self::RotatedTexturedQuad { texture, .. } => {
                Some(texture)
            }
            _ => None,
        }
    }
}

/// Commands produced during one frame.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Drops every command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Returns the number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the commands in submission order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Iterates commands in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands.iter()
    }

    /// Sorts back to front by `z`, keeping submission order for ties.
    pub fn sort_by_depth(&mut self) {
        self.commands
            .sort_by(|a, b| a.position().z.total_cmp(&b.position().z));
    }
}

impl Extend<DrawCommand> for DrawList {
    fn extend<I: IntoIterator<Item = DrawCommand>>(&mut self, iter: I) {
        self.commands.extend(iter);
    }
}

/// Default renderer: Transform + Drawable + Colored entities.
#[derive(Clone, Debug, Default)]
pub struct RenderSystem {
    draw_list: DrawList,
}

impl RenderSystem {
    /// Creates a renderer with an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The components this system requires.
    ///
    /// # Errors
    ///
    /// Fails if the engine components are not registered.
    pub fn signature(world: &World) -> Result<Signature> {
        Ok(Signature::of(&[
            world.component_type::<Transform>()?,
            world.component_type::<Drawable>()?,
            world.component_type::<Colored>()?,
        ]))
    }

    /// Commands from the last frame.
    #[must_use]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }
}

impl System for RenderSystem {
    fn on_update(&mut self, ctx: &mut SystemContext<'_>, _ts: Timestep) -> Result<()> {
        self.draw_list.clear();
        for entity in &ctx.members() {
            let transform = ctx.component::<Transform>(entity)?;
            let color = ctx.component::<Colored>(entity)?.color;
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
