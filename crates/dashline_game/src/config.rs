//! Game tuning.

use dashline_ecs::{Error, ErrorKind, Result, WorldConfig};

/// Every tunable number in the game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Entity limit and friends.
    pub world: WorldConfig,
    /// Vertical gravity force on the player.
    pub gravity: f32,
    /// Upward velocity of a jump.
    pub jump_velocity: f32,
    /// Horizontal speed while a direction key is held.
    pub horizontal_speed: f32,
    /// Fastest the player may fall (positive number).
    pub max_fall_speed: f32,
    /// Fastest the player may rise.
    pub max_rise_speed: f32,
    /// Falling below this height kills the player.
    pub kill_plane: f32,
    /// How many checkpoints are kept before the oldest is dropped.
    pub checkpoint_capacity: usize,
    /// Initial camera zoom (half the visible height).
    pub zoom: f32,
    /// Initial viewport width / height.
    pub aspect_ratio: f32,
    /// Particle pool size.
    pub particle_pool: usize,
    /// Particles emitted when the player dies.
    pub death_particles: usize,
    /// Seed for every random number in the game.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            gravity: -140.0,
            jump_velocity: 30.0,
            horizontal_speed: 5.0,
            max_fall_speed: 20.0,
            max_rise_speed: 30.0,
            kill_plane: -10.0,
            checkpoint_capacity: 8,
            zoom: 8.0,
            aspect_ratio: 1280.0 / 720.0,
            particle_pool: 1000,
            death_particles: 40,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// A small configuration for tests: compact world, small particle pool.
    #[must_use]
    pub fn testing() -> Self {
        Self {
            world: WorldConfig::compact(),
            checkpoint_capacity: 4,
            particle_pool: 64,
            death_particles: 8,
            ..Self::default()
        }
    }

    /// Builder method to set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to set the checkpoint capacity.
    #[must_use]
    pub fn with_checkpoint_capacity(mut self, capacity: usize) -> Self {
        self.checkpoint_capacity = capacity;
        self
    }

    /// Builder method to set the world configuration.
    #[must_use]
    pub fn with_world(mut self, world: WorldConfig) -> Self {
        self.world = world;
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns a config error naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        fn bad(message: &str) -> Result<()> {
            Err(Error::new(ErrorKind::Config(message.to_owned())))
        }

        self.world.validate()?;
        if self.checkpoint_capacity == 0 {
            return bad("checkpoint_capacity must be at least 1");
        }
        if self.max_fall_speed <= 0.0 || self.max_rise_speed <= 0.0 {
            return bad("velocity caps must be positive");
        }
        if self.zoom <= 0.0 || self.aspect_ratio <= 0.0 {
            return bad("zoom and aspect_ratio must be positive");
        }
        Ok(())
    }
}
