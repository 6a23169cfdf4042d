//! The view of the world a system gets while it runs.

use dashline_foundation::{ComponentType, Entity, EntitySet, Result, Signature};

use crate::component::{Component, ComponentArray};
use crate::system::System;
use crate::world::World;

/// Mutable access to the world for the system currently running.
///
/// Entity and component operations behave exactly as on [`World`], including
/// membership notifications. Registering systems and taking snapshots are not
/// available from inside a pass.
pub struct SystemContext<'w> {
    world: &'w mut World,
    position: usize,
}

impl<'w> SystemContext<'w> {
    pub(crate) fn new(world: &'w mut World, position: usize) -> Self {
        Self { world, position }
    }

    /// Returns a copy of the running system's current membership.
    ///
    /// The copy is cheap and stays valid while the world is mutated, so it is
    /// the way to iterate members and change components at the same time.
    #[must_use]
    pub fn members(&self) -> EntitySet {
        self.world
            .systems
            .members_at(self.position)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the number of the frame being run.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.world.frame()
    }

    // -------------------------------------------------------------------------
    // Entities
    // -------------------------------------------------------------------------

    /// See [`World::create_entity`].
    ///
    /// # Errors
    ///
    /// Fails when the entity limit is reached.
    pub fn create_entity(&mut self) -> Result<Entity> {
        self.world.create_entity()
    }

    /// See [`World::destroy_entity`].
    ///
    /// # Errors
    ///
    /// Fails if the entity is not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<()> {
        self.world.destroy_entity(entity)
    }

    /// Checks if `entity` is alive.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.world.is_alive(entity)
    }

    /// See [`World::signature`].
    ///
    /// # Errors
    ///
    /// Fails if the entity is not alive.
    pub fn signature(&self, entity: Entity) -> Result<Signature> {
        self.world.signature(entity)
    }

    // -------------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------------

    /// See [`World::add_component`].
    ///
    /// # Errors
    ///
    /// Fails on dead entities, unregistered kinds and double inserts.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<()> {
        self.world.add_component(entity, value)
    }

    /// See [`World::remove_component`].
    ///
    /// # Errors
    ///
    /// Fails on dead entities, unregistered kinds and missing components.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T> {
        self.world.remove_component(entity)
    }

    /// See [`World::component`].
    ///
    /// # Errors
    ///
    /// Fails on dead entities, unregistered kinds and missing components.
    pub fn component<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.world.component(entity)
    }

    /// See [`World::component_mut`].
    ///
    /// # Errors
    ///
    /// Fails on dead entities, unregistered kinds and missing components.
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.world.component_mut(entity)
    }

    /// See [`World::try_component`].
    #[must_use]
    pub fn try_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.world.try_component(entity)
    }

    /// See [`World::has_component`].
    ///
    /// # Errors
    ///
    /// Fails on dead entities and unregistered kinds.
    pub fn has_component<T: Component>(&self, entity: Entity) -> Result<bool> {
        self.world.has_component::<T>(entity)
    }

    /// See [`World::components`].
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered.
    pub fn components<T: Component>(&self) -> Result<&ComponentArray<T>> {
        self.world.components()
    }

    /// See [`World::component_type`].
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered.
    pub fn component_type<T: Component>(&self) -> Result<ComponentType> {
        self.world.component_type::<T>()
    }

    // -------------------------------------------------------------------------
    // Other systems
    // -------------------------------------------------------------------------

    /// Returns another registered system.
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered, or is the system currently running.
    pub fn system<T: System>(&self) -> Result<&T> {
        self.world.system()
    }

    /// Returns another registered system mutably.
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered, or is the system currently running.
    pub fn system_mut<T: System>(&mut self) -> Result<&mut T> {
        self.world.system_mut()
    }
}
