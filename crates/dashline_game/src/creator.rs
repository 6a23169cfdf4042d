//! Level object creators.
//!
//! Each creator either returns a complete entity or leaves the world as it
//! was: a failure half way through destroys the partial entity.

use dashline_ecs::{Entity, Result, World};
use dashline_engine::{AssetRegistry, Colored, Gravity, QuadBuilder, RigidBody};
use glam::{Vec2, Vec3, Vec4};
use log::{debug, warn};

use crate::components::{GameObject, ObjectKind, PlayerState};
use crate::config::GameConfig;

const GROUND_COLOR: Vec4 = Vec4::new(0.3, 0.8, 0.2, 1.0);
const CHECKPOINT_COLOR: Vec4 = Vec4::new(0.2, 0.6, 1.0, 0.6);

/// Runs `attach` on a fresh entity, destroying it again if `attach` fails.
fn finish(
    world: &mut World,
    entity: Entity,
    attach: impl FnOnce(&mut World) -> Result<()>,
) -> Result<Entity> {
    if let Err(err) = attach(world) {
        if let Err(cleanup) = world.destroy_entity(entity) {
            warn!("could not discard partial object {entity:?}: {cleanup}");
        }
        return Err(err);
    }
    Ok(entity)
}

/// Creates the player: a textured unit cube under gravity.
///
/// # Errors
///
/// Fails if a component is unregistered or the entity limit is reached.
pub fn create_player(
    world: &mut World,
    assets: &mut AssetRegistry,
    config: &GameConfig,
    position: Vec3,
) -> Result<Entity> {
    let texture = assets.intern("default-player.png");
    let player = QuadBuilder::new(position, Vec2::ONE)
        .texture(texture, 1.0)
        .build(world)?;

    finish(world, player, |world| {
        world.add_component(player, PlayerState::default())?;
        world.add_component(
            player,
            Gravity {
                force: Vec3::new(0.0, config.gravity, 0.0),
            },
        )?;
        world.add_component(player, RigidBody::default())?;
        world.add_component(player, GameObject::new(ObjectKind::Player))
    })
}

/// Creates a green floor tile.
///
/// # Errors
///
/// Fails if a component is unregistered or the entity limit is reached.
pub fn create_ground(world: &mut World, position: Vec2, size: Vec2) -> Result<Entity> {
    let ground = QuadBuilder::at(position, size)
        .color(GROUND_COLOR)
        .build(world)?;
    finish(world, ground, |world| {
        world.add_component(ground, GameObject::new(ObjectKind::Ground))
    })
}

/// Creates a solid textured block.
///
/// # Errors
///
/// Fails if a component is unregistered or the entity limit is reached.
pub fn create_square(world: &mut World, assets: &mut AssetRegistry, position: Vec3) -> Result<Entity> {
    textured_object(
        world,
        assets,
        "default-square.png",
        position,
        GameObject::new(ObjectKind::Square),
    )
}

/// Creates a spike.
///
/// # Errors
///
/// Fails if a component is unregistered or the entity limit is reached.
pub fn create_triangle(
    world: &mut World,
    assets: &mut AssetRegistry,
    position: Vec3,
) -> Result<Entity> {
    textured_object(
        world,
        assets,
        "default-triangle.png",
        position,
        GameObject::harmful(ObjectKind::Triangle),
    )
}

/// Creates a checkpoint flag: a tall translucent quad.
///
/// # Errors
///
/// Fails if a component is unregistered or the entity limit is reached.
pub fn create_checkpoint(world: &mut World, position: Vec2) -> Result<Entity> {
    let flag = QuadBuilder::at(position, Vec2::new(0.5, 2.0))
        .color(CHECKPOINT_COLOR)
        .build(world)?;
    finish(world, flag, |world| {
        world.add_component(flag, GameObject::new(ObjectKind::Checkpoint))
    })
}

/// Textured unit quad that draws with its texture's own colors.
fn textured_object(
    world: &mut World,
    assets: &mut AssetRegistry,
    texture: &str,
    position: Vec3,
    object: GameObject,
) -> Result<Entity> {
    let texture = assets.intern(texture);
    let entity = QuadBuilder::new(position, Vec2::ONE)
        .texture(texture, 1.0)
        .build(world)?;
    finish(world, entity, |world| {
        world.remove_component::<Colored>(entity)?;
        world.add_component(entity, object)
    })
}

/// Entities making up a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    /// The player.
    pub player: Entity,
    /// Floor tiles, left to right.
    pub ground: Vec<Entity>,
    /// Solid blocks.
    pub squares: Vec<Entity>,
    /// Spikes.
    pub triangles: Vec<Entity>,
    /// Checkpoint flags.
    pub checkpoints: Vec<Entity>,
}

impl Level {
    /// Total number of entities in the level.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.ground.len() + self.squares.len() + self.triangles.len() + self.checkpoints.len()
    }

    /// Never true; a level always has a player.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Builds the demo level: a floor of ten tiles, a staircase of three blocks,
/// a spike past the stairs and a checkpoint before them.
///
/// # Errors
///
/// Fails if a component is unregistered or the entity limit is reached.
#[allow(clippy::cast_precision_loss)]
pub fn build_demo_level(
    world: &mut World,
    assets: &mut AssetRegistry,
    config: &GameConfig,
) -> Result<Level> {
    let mut level = Level {
        player: create_player(world, assets, config, Vec3::new(0.0, 4.0, 0.9))?,
        ground: Vec::with_capacity(10),
        squares: Vec::with_capacity(3),
        triangles: Vec::new(),
        checkpoints: Vec::new(),
    };

    for i in 0..10 {
        let x = i as f32 * 3.0;
        level
            .ground
            .push(create_ground(world, Vec2::new(x, 0.0), Vec2::new(3.0, 4.0))?);
    }
    for i in 0..3 {
        let step = i as f32;
        level.squares.push(create_square(
            world,
            assets,
            Vec3::new(7.0 + step * 2.0, 3.0 + step * 0.5, 0.0),
        )?);
    }
    level
        .triangles
        .push(create_triangle(world, assets, Vec3::new(16.0, 2.5, 0.0))?);
    level
        .checkpoints
        .push(create_checkpoint(world, Vec2::new(4.0, 3.0))?);

    debug!("demo level built with {} entities", level.len());
    Ok(level)
}
