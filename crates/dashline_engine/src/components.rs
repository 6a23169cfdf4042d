//! Engine-level components.
//!
//! Plain data; behavior lives in systems. All of them are `Clone`, which is
//! all the ECS needs to snapshot them.

use glam::{Vec2, Vec3, Vec4};

use crate::assets::TextureHandle;

/// Placement of an entity in the world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Center position; `z` orders drawing.
    pub position: Vec3,
    /// Width and height.
    pub size: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
}

impl Transform {
    /// Creates an unrotated transform.
    #[must_use]
    pub const fn new(position: Vec3, size: Vec2) -> Self {
        Self {
            position,
            size,
            rotation: 0.0,
        }
    }

    /// Builder method to set the rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Left edge.
    #[must_use]
    pub fn left(&self) -> f32 {
        self.position.x - self.size.x / 2.0
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.position.x + self.size.x / 2.0
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.position.y - self.size.y / 2.0
    }

    /// Top edge.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.position.y + self.size.y / 2.0
    }

    /// True if the two boxes overlap horizontally.
    #[must_use]
    pub fn overlaps_x(&self, other: &Transform) -> bool {
        self.right() >= other.left() && self.left() <= other.right()
    }

    /// True if the two boxes overlap on both axes.
    #[must_use]
    pub fn overlaps(&self, other: &Transform) -> bool {
        self.overlaps_x(other) && self.top() >= other.bottom() && self.bottom() <= other.top()
    }
}

/// Constant force applied to a rigid body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gravity {
    /// The force vector.
    pub force: Vec3,
}

/// Kinematic state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RigidBody {
    /// Current velocity.
    pub velocity: Vec3,
    /// Acceleration from the last step.
    pub acceleration: Vec3,
    /// Mass; never zero for movable bodies.
    pub mass: f32,
    /// Static bodies are skipped by physics.
    pub movable: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass: 1.0,
            movable: true,
        }
    }
}

/// Solid color, or the tint for textured drawing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Colored {
    /// RGBA color.
    pub color: Vec4,
}

/// Texture applied when drawing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Textured {
    /// Which texture.
    pub texture: TextureHandle,
    /// How many times the texture repeats across the quad.
    pub tiling_factor: f32,
}

/// Shape drawn for an entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrimitiveGeometry {
    /// Three-sided primitive.
    Triangle,
    /// Four-sided primitive.
    Quad,
}

/// Marks an entity as drawable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Drawable {
    /// The shape to draw.
    pub geometry: PrimitiveGeometry,
}

/// Remaining health.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Health {
    /// 1.0 is full health.
    pub health: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self { health: 1.0 }
    }
}
