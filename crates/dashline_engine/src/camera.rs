//! 2D orthographic camera.

use glam::{Mat4, Vec3};

/// Orthographic projection plus a position and a rotation about `z`.
///
/// Matrices are recomputed eagerly whenever a setter runs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrthographicCamera {
    projection: Mat4,
    view: Mat4,
    view_projection: Mat4,
    position: Vec3,
    /// Degrees.
    rotation: f32,
}

impl OrthographicCamera {
    /// Creates a camera looking at the given bounds.
    #[must_use]
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        let projection = Mat4::orthographic_rh_gl(left, right, bottom, top, -1.0, 1.0);
        Self {
            projection,
            view: Mat4::IDENTITY,
            view_projection: projection,
            position: Vec3::ZERO,
            rotation: 0.0,
        }
    }

    /// Creates a camera showing `zoom` units above and below the center, and
    /// `aspect * zoom` to each side.
    #[must_use]
    pub fn from_zoom(aspect: f32, zoom: f32) -> Self {
        Self::new(-aspect * zoom, aspect * zoom, -zoom, zoom)
    }

    /// Replaces the projection bounds.
    pub fn set_projection(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.projection = Mat4::orthographic_rh_gl(left, right, bottom, top, -1.0, 1.0);
        self.view_projection = self.projection * self.view;
    }

    /// Moves the camera.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recalculate_view();
    }

    /// Rotates the camera, in degrees.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
        self.recalculate_view();
    }

    /// Camera position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Camera rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Projection matrix.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// View matrix (inverse of the camera transform).
    #[must_use]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Projection * view.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    /// Maps a world point to normalized device coordinates.
    #[must_use]
    pub fn to_clip(&self, point: Vec3) -> Vec3 {
        self.view_projection.project_point3(point)
    }

    fn recalculate_view(&mut self) {
        let transform = Mat4::from_translation(self.position)
            * Mat4::from_rotation_z(self.rotation.to_radians());
        self.view = transform.inverse();
        self.view_projection = self.projection * self.view;
    }
}
