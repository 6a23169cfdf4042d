//! Checkpoint ring buffer.
//!
//! Keeps the last few world snapshots so the game can rewind to the most
//! recent one when the player dies.

use std::collections::VecDeque;
use std::fmt;

use dashline_ecs::{Entity, World};

// =============================================================================
// Checkpoint
// =============================================================================

/// Why a checkpoint was taken.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheckpointReason {
    /// The player touched a checkpoint object.
    Reached(Entity),
    /// Saved on request.
    Manual,
}

impl fmt::Display for CheckpointReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reached(entity) => write!(f, "reached {entity}"),
            Self::Manual => f.write_str("manual"),
        }
    }
}

/// A saved world.
#[derive(Clone, Debug)]
pub struct Checkpoint {
    frame: u64,
    world: World,
    reason: CheckpointReason,
}

impl Checkpoint {
    /// Creates a checkpoint from an already captured snapshot.
    #[must_use]
    pub fn new(frame: u64, world: World, reason: CheckpointReason) -> Self {
        Self {
            frame,
            world,
            reason,
        }
    }

    /// Frame the snapshot was taken on.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// The saved world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Why it was saved.
    #[must_use]
    pub const fn reason(&self) -> CheckpointReason {
        self.reason
    }
}

// =============================================================================
// Checkpoint History
// =============================================================================

/// Bounded buffer of checkpoints, oldest first.
#[derive(Clone, Debug)]
pub struct CheckpointHistory {
    checkpoints: VecDeque<Checkpoint>,
    capacity: usize,
}

impl CheckpointHistory {
    /// Creates an empty history holding at most `capacity` checkpoints.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            checkpoints: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Maximum number of checkpoints kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of checkpoints held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// True if nothing was saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Saves a checkpoint, evicting the oldest when full.
    pub fn push(&mut self, checkpoint: Checkpoint) {
        if self.checkpoints.len() >= self.capacity {
            self.checkpoints.pop_front();
        }
        self.checkpoints.push_back(checkpoint);
    }

    /// Most recent checkpoint saved on `frame`.
    #[must_use]
    pub fn get(&self, frame: u64) -> Option<&Checkpoint> {
        self.checkpoints.iter().rev().find(|c| c.frame == frame)
    }

    /// Newest checkpoint.
    #[must_use]
    pub fn latest(&self) -> Option<&Checkpoint> {
        self.checkpoints.back()
    }

    /// Oldest checkpoint still held.
    #[must_use]
    pub fn oldest(&self) -> Option<&Checkpoint> {
        self.checkpoints.front()
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }

    /// The `count` newest checkpoints, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &Checkpoint> {
        let skip = self.checkpoints.len().saturating_sub(count);
        self.checkpoints.iter().skip(skip)
    }

    /// Drops every checkpoint saved after `frame`.
    pub fn truncate_after(&mut self, frame: u64) {
        while self.checkpoints.back().is_some_and(|c| c.frame > frame) {
            self.checkpoints.pop_back();
        }
    }

    /// First and last saved frames.
    #[must_use]
    pub fn frame_range(&self) -> Option<(u64, u64)> {
        Some((self.checkpoints.front()?.frame, self.checkpoints.back()?.frame))
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        self.checkpoints.clear();
    }
}

impl Default for CheckpointHistory {
    fn default() -> Self {
        Self::new(8)
    }
}
