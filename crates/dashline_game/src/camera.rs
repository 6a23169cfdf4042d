//! Camera control.

use dashline_ecs::{Entity, Event, Result, System, SystemContext, Timestep};
use dashline_engine::{InputState, OrthographicCamera, Transform};
use dashline_foundation::KeyCode;
use glam::Vec3;

/// Zoom change per scroll notch.
const ZOOM_STEP: f32 = 0.25;
/// Closest allowed zoom.
const MIN_ZOOM: f32 = 0.000_01;
/// Degrees per second while Q or E is held.
const ROTATION_SPEED: f32 = 180.0;

/// Owns the game camera: scroll zoom, resize aspect, WASD pan, Q/E rotation,
/// and following the tracked player.
///
/// Registered without a signature, so it never iterates members.
#[derive(Clone, Debug)]
pub struct CameraSystem {
    camera: OrthographicCamera,
    player: Option<Entity>,
    input: InputState,
    aspect_ratio: f32,
    zoom: f32,
    rotation_enabled: bool,
    /// Degrees, kept in (-180, 180].
    rotation: f32,
    /// Pan offset from the followed point.
    offset: Vec3,
    translation_speed: f32,
}

impl CameraSystem {
    /// Creates a camera with the given aspect ratio and zoom.
    #[must_use]
    pub fn new(aspect_ratio: f32, zoom: f32) -> Self {
        Self {
            camera: OrthographicCamera::from_zoom(aspect_ratio, zoom),
            player: None,
            input: InputState::new(),
            aspect_ratio,
            zoom,
            rotation_enabled: true,
            rotation: 0.0,
            offset: Vec3::ZERO,
            translation_speed: zoom,
        }
    }

    /// Builder method to turn Q/E rotation on or off.
    #[must_use]
    pub fn with_rotation(mut self, enabled: bool) -> Self {
        self.rotation_enabled = enabled;
        self
    }

    /// Follows `player`.
    pub fn set_player(&mut self, player: Entity) {
        self.player = Some(player);
    }

    /// The followed entity.
    #[must_use]
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Replaces the input seen by the next update.
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    /// Current zoom.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Current aspect ratio.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    fn reproject(&mut self) {
        let (x, y) = (self.aspect_ratio * self.zoom, self.zoom);
        self.camera.set_projection(-x, x, -y, y);
    }

    fn pan(&mut self, dt: f32) {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let step = self.translation_speed * dt;
        let right = Vec3::new(cos, sin, 0.0) * step;
        let up = Vec3::new(-sin, cos, 0.0) * step;

        if self.input.is_pressed(KeyCode::A) {
            self.offset -= right;
        }
        if self.input.is_pressed(KeyCode::D) {
            self.offset += right;
        }
        if self.input.is_pressed(KeyCode::S) {
            self.offset -= up;
        }
        if self.input.is_pressed(KeyCode::W) {
            self.offset += up;
        }
    }

    fn turn(&mut self, dt: f32) {
        if self.input.is_pressed(KeyCode::Q) {
            self.rotation += ROTATION_SPEED * dt;
        }
        if self.input.is_pressed(KeyCode::E) {
            self.rotation -= ROTATION_SPEED * dt;
        }
        if self.rotation > 180.0 {
            self.rotation -= 360.0;
        } else if self.rotation <= -180.0 {
            self.rotation += 360.0;
        }
        self.camera.set_rotation(self.rotation);
    }
}

impl System for CameraSystem {
    fn on_update(&mut self, ctx: &mut SystemContext<'_>, ts: Timestep) -> Result<()> {
        let dt = ts.seconds();
        self.pan(dt);
        if self.rotation_enabled {
            self.turn(dt);
        }

        let anchor = self
            .player
            .and_then(|player| ctx.try_component::<Transform>(player))
            .map_or(Vec3::ZERO, |t| t.position.truncate().extend(0.0));
        self.camera.set_position(anchor + self.offset);

        self.translation_speed = self.zoom;
        Ok(())
    }

    fn on_event(&mut self, _ctx: &mut SystemContext<'_>, event: &Event) -> Result<()> {
        match *event {
            Event::MouseScrolled { y_offset, .. } => {
                self.zoom = (self.zoom - y_offset * ZOOM_STEP).max(MIN_ZOOM);
                self.reproject();
            }
            #[allow(clippy::cast_precision_loss)]
            Event::WindowResized { width, height } if height > 0 => {
                self.aspect_ratio = width as f32 / height as f32;
                self.reproject();
            }
            _ => {}
        }
        Ok(())
    }
}
