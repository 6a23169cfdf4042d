//! Platformer components.

use dashline_ecs::{Result, World};

/// How the player moves. Only the cube exists so far.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameMode {
    /// Runs and jumps.
    #[default]
    Cube,
}

/// Per-player state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    /// Current movement mode.
    pub mode: GameMode,
    /// Standing on something this frame.
    pub on_ground: bool,
    /// Cleared when the player hits something harmful or falls out.
    pub alive: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            mode: GameMode::Cube,
            on_ground: false,
            alive: true,
        }
    }
}

/// What a level object is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// The player.
    Player,
    /// Floor tiles.
    Ground,
    /// Solid block the player can land on.
    Square,
    /// Spike.
    Triangle,
    /// Saves the game when touched.
    Checkpoint,
}

/// Marks an entity as part of the level.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameObject {
    /// What it is.
    pub kind: ObjectKind,
    /// Touching it kills the player.
    pub harmful: bool,
}

impl GameObject {
    /// Creates a harmless object.
    #[must_use]
    pub const fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            harmful: false,
        }
    }

    /// Creates a harmful object.
    #[must_use]
    pub const fn harmful(kind: ObjectKind) -> Self {
        Self {
            kind,
            harmful: true,
        }
    }

    /// True for objects the player can stand on.
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        !self.harmful && matches!(self.kind, ObjectKind::Ground | ObjectKind::Square)
    }
}

/// Registers the game components after the engine ones.
///
/// # Errors
///
/// Fails if either is already registered.
pub fn register_game_components(world: &mut World) -> Result<()> {
    world.register_component::<PlayerState>()?;
    world.register_component::<GameObject>()?;
    Ok(())
}
