//! Composite quad construction.

use dashline_ecs::{Entity, Result, World};
use glam::{Vec2, Vec3, Vec4};
use log::warn;

use crate::assets::TextureHandle;
use crate::components::{Colored, Drawable, PrimitiveGeometry, Textured, Transform};

/// Builds a drawable entity: Transform + Colored + Drawable, plus Textured
/// when a texture is set.
///
/// ```ignore
/// let ground = QuadBuilder::new(Vec3::new(0.0, 0.0, 0.0), Vec2::new(3.0, 4.0))
///     .color(Vec4::new(0.3, 0.8, 0.2, 1.0))
///     .build(&mut world)?;
/// ```
#[derive(Copy, Clone, Debug)]
pub struct QuadBuilder {
    transform: Transform,
    color: Vec4,
    geometry: PrimitiveGeometry,
    texture: Option<Textured>,
}

impl QuadBuilder {
    /// Starts a white, untextured quad.
    #[must_use]
    pub fn new(position: Vec3, size: Vec2) -> Self {
        Self {
            transform: Transform::new(position, size),
            color: Vec4::ONE,
            geometry: PrimitiveGeometry::Quad,
            texture: None,
        }
    }

    /// Starts a quad on the `z = 0` plane.
    #[must_use]
    pub fn at(position: Vec2, size: Vec2) -> Self {
        Self::new(position.extend(0.0), size)
    }

    /// Sets the fill color, or the tint if textured.
    #[must_use]
    pub fn color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Sets the rotation in degrees.
    #[must_use]
    pub fn rotation(mut self, degrees: f32) -> Self {
        self.transform.rotation = degrees;
        self
    }

    /// Adds a texture.
    #[must_use]
    pub fn texture(mut self, texture: TextureHandle, tiling_factor: f32) -> Self {
        self.texture = Some(Textured {
            texture,
            tiling_factor,
        });
        self
    }

    /// Draws a triangle instead of a quad.
    #[must_use]
    pub fn triangle(mut self) -> Self {
        self.geometry = PrimitiveGeometry::Triangle;
        self
    }

    /// Creates the entity.
    ///
    /// If any component cannot be added the entity is destroyed again, so no
    /// half-built entity is left behind.
    ///
    /// # Errors
    ///
    /// Fails when the entity limit is reached or an engine component is not
    /// registered.
    pub fn build(&self, world: &mut World) -> Result<Entity> {
        let entity = world.create_entity()?;
        if let Err(err) = self.attach(world, entity) {
            if let Err(cleanup) = world.destroy_entity(entity) {
                warn!("could not discard partial quad {entity:?}: {cleanup}");
            }
            return Err(err);
        }
        Ok(entity)
    }

    fn attach(&self, world: &mut World, entity: Entity) -> Result<()> {
        world.add_component(entity, self.transform)?;
        world.add_component(entity, Colored { color: self.color })?;
        world.add_component(
            entity,
            Drawable {
                geometry: self.geometry,
            },
        )?;
        if let Some(texture) = self.texture {
            world.add_component(entity, texture)?;
        }
        Ok(())
    }
}
