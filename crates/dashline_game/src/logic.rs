//! Player movement, collisions, and death.
//!
//! The player is integrated here rather than by the engine physics so the
//! velocity caps and landing snap happen in the same step. Every other
//! member is a level object tested against the player once per frame.

use std::collections::BTreeSet;

use dashline_ecs::{Entity, Result, Signature, System, SystemContext, Timestep, World};
use dashline_engine::{Gravity, InputState, RigidBody, Transform};
use dashline_foundation::KeyCode;
use log::{debug, trace};

use crate::components::{GameMode, GameObject, ObjectKind, PlayerState};
use crate::config::GameConfig;

/// Movement numbers the logic needs from [`GameConfig`].
#[derive(Copy, Clone, Debug, PartialEq)]
struct Tuning {
    jump_velocity: f32,
    horizontal_speed: f32,
    max_fall_speed: f32,
    max_rise_speed: f32,
    kill_plane: f32,
}

impl From<&GameConfig> for Tuning {
    fn from(config: &GameConfig) -> Self {
        Self {
            jump_velocity: config.jump_velocity,
            horizontal_speed: config.horizontal_speed,
            max_fall_speed: config.max_fall_speed,
            max_rise_speed: config.max_rise_speed,
            kill_plane: config.kill_plane,
        }
    }
}

/// Drives the player over Transform + GameObject entities.
#[derive(Clone, Debug)]
pub struct GameLogicSystem {
    player: Option<Entity>,
    input: InputState,
    tuning: Tuning,
    /// Checkpoints already reported.
    visited: BTreeSet<Entity>,
    /// Checkpoints reached since the last drain.
    reached: Vec<Entity>,
}

impl GameLogicSystem {
    /// Creates the system with the given tuning.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            player: None,
            input: InputState::new(),
            tuning: Tuning::from(config),
            visited: BTreeSet::new(),
            reached: Vec::new(),
        }
    }

    /// The components this system requires.
    ///
    /// # Errors
    ///
    /// Fails if Transform or GameObject are not registered.
    pub fn signature(world: &World) -> Result<Signature> {
        Ok(Signature::of(&[
            world.component_type::<Transform>()?,
            world.component_type::<GameObject>()?,
        ]))
    }

    /// Tracks `player` as the entity under control.
    pub fn set_player(&mut self, player: Entity) {
        self.player = Some(player);
    }

    /// The tracked player.
    #[must_use]
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Replaces the input seen by the next update.
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Returns checkpoints reached since the last call, in id order per frame.
    pub fn take_reached_checkpoints(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.reached)
    }

    /// Applies input to the body for the current game mode.
    fn steer(&self, state: &PlayerState, body: &mut RigidBody) {
        match state.mode {
            GameMode::Cube => {
                if self.input.is_pressed(KeyCode::Space) && state.on_ground {
                    body.velocity.y = self.tuning.jump_velocity;
                }
                body.velocity.x = if self.input.is_pressed(KeyCode::Right) {
                    self.tuning.horizontal_speed
                } else if self.input.is_pressed(KeyCode::Left) {
                    -self.tuning.horizontal_speed
                } else {
                    0.0
                };
            }
        }
    }
}

impl System for GameLogicSystem {
    fn on_update(&mut self, ctx: &mut SystemContext<'_>, ts: Timestep) -> Result<()> {
        let Some(player) = self.player.filter(|&p| ctx.is_alive(p)) else {
            return Ok(());
        };
        let mut state = *ctx.component::<PlayerState>(player)?;
        if !state.alive {
            return Ok(());
        }

        let dt = ts.seconds();
        let force = ctx.component::<Gravity>(player)?.force;
        let mut body = *ctx.component::<RigidBody>(player)?;
        let mut transform = *ctx.component::<Transform>(player)?;

        self.steer(&state, &mut body);
        body.acceleration = force / body.mass;
        body.velocity += body.acceleration * dt;
        body.velocity.y = body
            .velocity
            .y
            .clamp(-self.tuning.max_fall_speed, self.tuning.max_rise_speed);
        transform.position += body.velocity * dt;

        state.on_ground = false;
        for entity in &ctx.members() {
            if entity == player {
                continue;
            }
            let object = *ctx.component::<GameObject>(entity)?;
            let other = *ctx.component::<Transform>(entity)?;
            if !transform.overlaps_x(&other) {
                continue;
            }

            if object.harmful {
                if transform.overlaps(&other) {
                    debug!("player hit {:?} {entity:?}", object.kind);
                    state.alive = false;
                }
            } else if object.is_solid() {
                // Land when the feet are at most a tenth of the height below
                // the top and at most half the height above it.
                let gap = transform.bottom() - other.top();
                if gap <= transform.size.y / 10.0 && gap >= -transform.size.y / 2.0 {
                    transform.position.y = other.top() + transform.size.y / 2.0;
                    body.velocity.y = 0.0;
                    state.on_ground = true;
                }
            } else if object.kind == ObjectKind::Checkpoint
                && transform.overlaps(&other)
                && self.visited.insert(entity)
            {
                trace!("checkpoint {entity:?} reached");
                self.reached.push(entity);
            }
        }

        if transform.position.y < self.tuning.kill_plane {
            debug!("player fell below {}", self.tuning.kill_plane);
            state.alive = false;
        }

        *ctx.component_mut::<RigidBody>(player)? = body;
        *ctx.component_mut::<Transform>(player)? = transform;
        *ctx.component_mut::<PlayerState>(player)? = state;
        Ok(())
    }

    fn on_entity_removed(&mut self, entity: Entity) {
        if self.player == Some(entity) {
            self.player = None;
        }
    }
}
