//! The main game layer.
//!
//! Owns the world, the checkpoint history and everything that must survive a
//! rewind: held input, particles, and the running statistics. Each frame it
//! pushes the held keys into the systems, runs the world, saves a checkpoint
//! for every flag the player touched, and rewinds when the player dies.

use dashline_ecs::{Entity, Error, Event, Result, Timestep, World};
use dashline_engine::{
    AssetRegistry, DrawList, InputState, Layer, OrthographicCamera, ParticleEmitter,
    ParticleProps, PhysicsSystem, RenderSystem, Transform, register_engine_components,
    register_engine_systems,
};
use dashline_foundation::KeyCode;
use glam::Vec3;
use log::{debug, info};

use crate::camera::CameraSystem;
use crate::components::{PlayerState, register_game_components};
use crate::config::GameConfig;
use crate::creator::{Level, build_demo_level};
use crate::history::{Checkpoint, CheckpointHistory, CheckpointReason};
use crate::logic::GameLogicSystem;
use crate::render::GameRenderSystem;

const LAYER_NAME: &str = "MainGame";

/// Counters that keep running across rewinds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStats {
    /// Frames run by the layer.
    pub frames: u64,
    /// Times the player died.
    pub deaths: u64,
    /// Times the world was rolled back.
    pub rewinds: u64,
    /// Checkpoints saved.
    pub checkpoints_saved: u64,
}

/// Runs the platformer.
#[derive(Debug)]
pub struct GameLayer {
    config: GameConfig,
    world: World,
    level: Level,
    assets: AssetRegistry,
    input: InputState,
    particles: ParticleEmitter,
    history: CheckpointHistory,
    /// The freshly built level, restored when there is no checkpoint yet.
    level_start: World,
    draw_list: DrawList,
    stats: GameStats,
}

impl GameLayer {
    /// Builds the world and the demo level.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the level does not fit.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let mut world = World::with_config(config.world.clone())?;

        register_engine_components(&mut world)?;
        register_engine_systems(&mut world)?;
        // The game integrates and draws the player itself.
        world.deregister_system::<PhysicsSystem>()?;
        world.deregister_system::<RenderSystem>()?;
        register_game_components(&mut world)?;

        let logic = GameLogicSystem::signature(&world)?;
        world.register_system_with_signature(GameLogicSystem::new(&config), logic)?;
        world.register_system(CameraSystem::new(config.aspect_ratio, config.zoom))?;
        let render = GameRenderSystem::signature(&world)?;
        world.register_system_with_signature(GameRenderSystem::new(), render)?;

        let mut assets = AssetRegistry::new();
        let level = build_demo_level(&mut world, &mut assets, &config)?;
        world.system_mut::<GameLogicSystem>()?.set_player(level.player);
        world.system_mut::<CameraSystem>()?.set_player(level.player);

        info!(
            "{LAYER_NAME}: level ready with {} entities, systems {:?}",
            world.entity_count(),
            world.system_names().collect::<Vec<_>>()
        );

        Ok(Self {
            level_start: world.snapshot(),
            particles: ParticleEmitter::new(config.particle_pool, config.seed),
            history: CheckpointHistory::new(config.checkpoint_capacity),
            world,
            level,
            assets,
            input: InputState::new(),
            draw_list: DrawList::new(),
            stats: GameStats::default(),
            config,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The live world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the live world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The player entity.
    #[must_use]
    pub fn player(&self) -> Entity {
        self.level.player
    }

    /// Entities of the level as built.
    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Running counters.
    #[must_use]
    pub fn stats(&self) -> GameStats {
        self.stats
    }

    /// Saved checkpoints.
    #[must_use]
    pub fn history(&self) -> &CheckpointHistory {
        &self.history
    }

    /// Everything to draw for the last frame, back to front.
    #[must_use]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Keys currently held.
    #[must_use]
    pub fn input(&self) -> InputState {
        self.input
    }

    /// The game camera.
    ///
    /// # Errors
    ///
    /// Fails if the camera system was deregistered.
    pub fn camera(&self) -> Result<&OrthographicCamera> {
        Ok(self.world.system::<CameraSystem>()?.camera())
    }

    /// The configuration the layer was built with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Texture names used by the level.
    #[must_use]
    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    /// Live particles.
    #[must_use]
    pub fn particles(&self) -> &ParticleEmitter {
        &self.particles
    }

    /// True while the player exists and has not died this frame.
    #[must_use]
    pub fn player_alive(&self) -> bool {
        self.world
            .try_component::<PlayerState>(self.level.player)
            .is_some_and(|state| state.alive)
    }

    // =========================================================================
    // Checkpoints
    // =========================================================================

    /// Saves the current world.
    pub fn save_checkpoint(&mut self, reason: CheckpointReason) {
        let frame = self.world.frame();
        self.history
            .push(Checkpoint::new(frame, self.world.snapshot(), reason));
        self.stats.checkpoints_saved += 1;
        info!("checkpoint saved at frame {frame} ({reason})");
    }

    /// Restores the latest checkpoint, or the level start if there is none.
    pub fn rewind(&mut self) {
        match self.history.latest() {
            Some(checkpoint) => {
                info!(
                    "rewinding frame {} to checkpoint at frame {}",
                    self.world.frame(),
                    checkpoint.frame()
                );
                self.world.restore(checkpoint.world());
            }
            None => {
                info!("rewinding frame {} to level start", self.world.frame());
                self.world.restore(&self.level_start);
            }
        }
        self.stats.rewinds += 1;
    }

    /// Restores the checkpoint saved on `frame` and forgets every later one.
    ///
    /// Returns false, leaving everything untouched, if no checkpoint was saved
    /// on that frame.
    pub fn rewind_to(&mut self, frame: u64) -> bool {
        let Some(checkpoint) = self.history.get(frame) else {
            return false;
        };
        info!(
            "rewinding frame {} to checkpoint at frame {frame}",
            self.world.frame()
        );
        self.world.restore(checkpoint.world());
        self.history.truncate_after(frame);
        self.stats.rewinds += 1;
        true
    }

    /// Drops every checkpoint and goes back to the level start.
    pub fn restart(&mut self) {
        info!("restarting level");
        self.history.clear();
        self.particles.clear();
        self.world.restore(&self.level_start);
    }

    // =========================================================================
    // Frame
    // =========================================================================

    fn sync_input(&mut self) -> Result<()> {
        let input = self.input;
        self.world.system_mut::<GameLogicSystem>()?.set_input(input);
        self.world.system_mut::<CameraSystem>()?.set_input(input);
        Ok(())
    }

    fn context(&self, err: Error) -> Error {
        err.in_layer(LAYER_NAME, self.world.frame())
    }

    fn on_death(&mut self) {
        self.stats.deaths += 1;
        let position = self
            .world
            .try_component::<Transform>(self.level.player)
            .map_or(Vec3::ZERO, |t| t.position);
        debug!("player died at {position}");
        self.particles.burst(
            &ParticleProps {
                position,
                ..ParticleProps::default()
            },
            self.config.death_particles,
        );
        self.rewind();
    }

    fn rebuild_draw_list(&mut self) -> Result<()> {
        self.draw_list.clear();
        let world = self.world.system::<GameRenderSystem>()?.draw_list();
        self.draw_list.extend(world.iter().cloned());
        self.particles.draw(&mut self.draw_list);
        self.draw_list.sort_by_depth();
        Ok(())
    }
}

impl Layer for GameLayer {
    fn name(&self) -> &str {
        LAYER_NAME
    }

    fn on_detach(&mut self) {
        info!(
            "{LAYER_NAME}: detached after {} frames, {} deaths",
            self.stats.frames, self.stats.deaths
        );
    }

    fn on_update(&mut self, ts: Timestep) -> Result<()> {
        self.sync_input().map_err(|err| self.context(err))?;
        self.world.on_update(ts).map_err(|err| self.context(err))?;
        self.particles.on_update(ts);
        self.stats.frames += 1;

        let frame = self.world.frame();
        let reached = self
            .world
            .system_mut::<GameLogicSystem>()
            .map_err(|err| err.in_layer(LAYER_NAME, frame))?
            .take_reached_checkpoints();

        if self.player_alive() {
            for flag in reached {
                self.save_checkpoint(CheckpointReason::Reached(flag));
            }
        } else {
            self.on_death();
        }

        self.rebuild_draw_list().map_err(|err| self.context(err))
    }

    fn on_event(&mut self, event: &Event) -> Result<()> {
        self.input.on_event(event);
        match *event {
            Event::KeyPressed {
                key: KeyCode::X,
                repeat: false,
            } if self.player_alive() => self.save_checkpoint(CheckpointReason::Manual),
            Event::KeyPressed {
                key: KeyCode::Z,
                repeat: false,
            } => self.rewind(),
            _ => {}
        }
        self.world.on_event(event).map_err(|err| self.context(err))
    }
}
