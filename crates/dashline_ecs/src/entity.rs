//! Entity lifecycle management with generational indices.
//!
//! The `EntityRegistry` hands out ids from a fixed pool, keeps one
//! [`Signature`] per slot, and tracks generations to detect stale references
//! to destroyed entities.

// Allow usize to u32 casts - capacity never exceeds MAX_ENTITIES
#![allow(clippy::cast_possible_truncation)]

use std::collections::VecDeque;

use dashline_foundation::{Entity, Error, MAX_ENTITIES, Result, Signature};

/// Allocates entity ids and stores each entity's component signature.
///
/// Ids come from a FIFO queue: destroyed ids go to the back, so a freed slot
/// is reused as late as possible.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    /// Free indices, oldest-freed first.
    available: VecDeque<u32>,
    /// Generation counter for each slot.
    /// Even generations are free, odd generations are alive.
    generations: Vec<u32>,
    /// Component signature for each slot.
    signatures: Vec<Signature>,
    /// Count of live entities.
    live_count: usize,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    /// Creates a registry sized to [`MAX_ENTITIES`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_ENTITIES)
    }

    /// Creates a registry holding at most `capacity` live entities.
    ///
    /// The capacity is clamped to [`MAX_ENTITIES`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_ENTITIES);
        Self {
            available: (0..capacity as u32).collect(),
            generations: vec![0; capacity],
            signatures: vec![Signature::EMPTY; capacity],
            live_count: 0,
        }
    }

    /// Allocates a new entity with an empty signature.
    ///
    /// # Errors
    ///
    /// Returns `EntityLimitReached` if the registry is full.
    pub fn create(&mut self) -> Result<Entity> {
        if self.live_count >= self.capacity() {
            return Err(Error::entity_limit(self.capacity()));
        }
        let index = self
            .available
            .pop_front()
            .ok_or_else(|| Error::entity_limit(self.capacity()))?;

        let slot = index as usize;
        // Was even/free, now odd/alive
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.signatures[slot].reset();
        self.live_count += 1;

        Ok(Entity::new(index, self.generations[slot]))
    }

    /// Destroys an entity, clearing its signature and freeing its id.
    ///
    /// Components are not touched; the caller removes them first.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is out of range, stale, or not alive.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        self.validate(entity)?;

        let slot = entity.slot();
        self.signatures[slot].reset();
        // Was odd/alive, now even/free
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.available.push_back(entity.index);
        self.live_count -= 1;

        Ok(())
    }

    /// Validates that an entity is live.
    ///
    /// # Errors
    ///
    /// Returns `EntityOutOfRange` for indices beyond the capacity,
    /// `StaleEntity` on a generation mismatch, and `EntityNotFound` for a
    /// free slot.
    pub fn validate(&self, entity: Entity) -> Result<()> {
        let slot = entity.slot();
        let Some(&current) = self.generations.get(slot) else {
            return Err(Error::entity_out_of_range(entity, self.capacity()));
        };

        if current != entity.generation {
            // Destroyed and possibly reused
            return Err(Error::stale_entity(entity));
        }

        if current % 2 == 0 {
            return Err(Error::entity_not_found(entity));
        }

        Ok(())
    }

    /// Checks if an entity is alive and not stale.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.validate(entity).is_ok()
    }

    /// Returns the signature of a live entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive.
    pub fn signature(&self, entity: Entity) -> Result<Signature> {
        self.validate(entity)?;
        Ok(self.signatures[entity.slot()])
    }

    /// Replaces the signature of a live entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive.
    pub fn set_signature(&mut self, entity: Entity, signature: Signature) -> Result<()> {
        self.validate(entity)?;
        self.signatures[entity.slot()] = signature;
        Ok(())
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Returns the maximum number of live entities.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }

    /// Returns the current generation for an index, if it is in range.
    #[must_use]
    pub fn generation(&self, index: u32) -> Option<u32> {
        self.generations.get(index as usize).copied()
    }

    /// Iterates over all live entities in index order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.generations
            .iter()
            .enumerate()
            .filter(|(_, generation)| *generation % 2 == 1)
            .map(|(slot, generation)| Entity::new(slot as u32, *generation))
    }

    /// Iterates over all live entities with their signatures.
    pub fn iter_signatures(&self) -> impl Iterator<Item = (Entity, Signature)> + '_ {
        self.iter().map(|e| (e, self.signatures[e.slot()]))
    }
}
