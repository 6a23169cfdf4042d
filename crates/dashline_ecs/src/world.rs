//! The world: entities, components and systems behind one facade.
//!
//! Every structural change follows the same order: storage first, then the
//! entity's signature, then system membership. Systems therefore always see
//! a signature that already reflects the change they are notified about.
//!
//! A `World` is a plain value. [`World::snapshot`] is a deep copy and
//! [`World::restore`] writes a copy back, which is all a checkpoint needs.

use dashline_foundation::{
    ComponentType, Entity, EntitySet, Event, Result, Signature, Timestep,
};
use log::{debug, trace};

use crate::component::{Component, ComponentArray, ComponentRegistry};
use crate::config::WorldConfig;
use crate::context::SystemContext;
use crate::entity::EntityRegistry;
use crate::system::{System, SystemRegistry};

/// The ECS aggregate root.
#[derive(Clone, Debug)]
pub struct World {
    config: WorldConfig,
    entities: EntityRegistry,
    components: ComponentRegistry,
    pub(crate) systems: SystemRegistry,
    /// Frames run so far.
    frame: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(WorldConfig::default())
    }

    /// Creates a world with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error if the configuration is invalid.
    pub fn with_config(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: WorldConfig) -> Self {
        Self {
            entities: EntityRegistry::with_capacity(config.max_entities),
            components: ComponentRegistry::with_capacity(config.max_entities.min(64)),
            systems: SystemRegistry::new(),
            frame: 0,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns how many frames have been run.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Creates an entity with no components.
    ///
    /// Systems with an empty signature pick it up immediately.
    ///
    /// # Errors
    ///
    /// Returns `EntityLimitReached` when every slot is in use.
    pub fn create_entity(&mut self) -> Result<Entity> {
        let entity = self.entities.create()?;
        self.systems
            .entity_signature_changed(entity, Signature::EMPTY);
        trace!("created {entity:?}");
        Ok(entity)
    }

    /// Destroys an entity and every component it carries.
    ///
    /// Each system the entity belonged to gets `on_entity_removed`.
    ///
    /// # Errors
    ///
    /// Fails if the entity is not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<()> {
        self.entities.validate(entity)?;
        self.components.entity_destroyed(entity);
        self.systems.entity_destroyed(entity);
        self.entities.destroy(entity)?;
        trace!("destroyed {entity:?}");
        Ok(())
    }

    /// Checks if `entity` is alive.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Returns the entity's signature.
    ///
    /// # Errors
    ///
    /// Fails if the entity is not alive.
    pub fn signature(&self, entity: Entity) -> Result<Signature> {
        self.entities.signature(entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterates live entities by index.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Registers a component kind.
    ///
    /// # Errors
    ///
    /// Fails if `T` is already registered or the kind limit is reached.
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentType> {
        let ty = self.components.register::<T>()?;
        debug!("registered component {} as {ty}", std::any::type_name::<T>());
        Ok(ty)
    }

    /// Returns the kind assigned to `T`.
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered.
    pub fn component_type<T: Component>(&self) -> Result<ComponentType> {
        self.components.component_type::<T>()
    }

    /// Returns the type name registered as `ty`.
    #[must_use]
    pub fn component_name(&self, ty: ComponentType) -> Option<&'static str> {
        self.components.name(ty)
    }

    /// Returns true if `T` is registered.
    #[must_use]
    pub fn is_component_registered<T: Component>(&self) -> bool {
        self.components.is_registered::<T>()
    }

    /// Attaches a component to an entity.
    ///
    /// # Errors
    ///
    /// Fails if the entity is dead, `T` is unregistered, or the entity already
    /// has a `T`. Nothing changes on failure.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<()> {
        let signature = self.entities.signature(entity)?;
        let ty = self.components.insert(entity, value)?;

        let signature = signature.with(ty);
        self.entities.set_signature(entity, signature)?;
        self.systems.entity_signature_changed(entity, signature);
        Ok(())
    }

    /// Detaches and returns an entity's component.
    ///
    /// # Errors
    ///
    /// Fails if the entity is dead, `T` is unregistered, or the entity has no
    /// `T`. Nothing changes on failure.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T> {
        let signature = self.entities.signature(entity)?;
        let (ty, value) = self.components.remove::<T>(entity)?;

        let signature = signature.without(ty);
        self.entities.set_signature(entity, signature)?;
        self.systems.entity_signature_changed(entity, signature);
        Ok(value)
    }

    /// Returns an entity's component.
    ///
    /// # Errors
    ///
    /// Fails if the entity is dead, `T` is unregistered, or absent.
    pub fn component<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.entities.validate(entity)?;
        self.components.get(entity)
    }

    /// Returns an entity's component mutably.
    ///
    /// # Errors
    ///
    /// Fails if the entity is dead, `T` is unregistered, or absent.
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.entities.validate(entity)?;
        self.components.get_mut(entity)
    }

    /// Returns an entity's component if it is alive and has one.
    #[must_use]
    pub fn try_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.entities.is_alive(entity) {
            return None;
        }
        self.components.array::<T>().ok()?.try_get(entity)
    }

    /// Checks if an entity carries a `T`.
    ///
    /// # Errors
    ///
    /// Fails if the entity is dead or `T` is unregistered.
    pub fn has_component<T: Component>(&self, entity: Entity) -> Result<bool> {
        let ty = self.components.component_type::<T>()?;
        Ok(self.entities.signature(entity)?.contains(ty))
    }

    /// Returns the dense storage for `T`.
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered.
    pub fn components<T: Component>(&self) -> Result<&ComponentArray<T>> {
        self.components.array()
    }

    /// Iterates `(entity, &T)` in dense order.
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered.
    pub fn iter<T: Component>(&self) -> Result<impl Iterator<Item = (Entity, &T)> + '_> {
        Ok(self.components.array::<T>()?.iter())
    }

    /// Iterates `(entity, &mut T)` in dense order.
    ///
    /// Values are edited in place; adding or removing goes through the world
    /// so signatures stay in sync.
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered.
    pub fn iter_mut<T: Component>(
        &mut self,
    ) -> Result<impl Iterator<Item = (Entity, &mut T)> + '_> {
        Ok(self.components.array_mut::<T>()?.iter_mut())
    }

    /// Returns how many entities carry a `T`.
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered.
    pub fn component_count<T: Component>(&self) -> Result<usize> {
        Ok(self.components.array::<T>()?.len())
    }

    // =========================================================================
    // Systems
    // =========================================================================

    /// Registers a system with an empty signature and returns it for setup.
    ///
    /// Every live entity becomes a member until a signature is set.
    ///
    /// # Errors
    ///
    /// Fails if a `T` is already registered.
    pub fn register_system<T: System + Clone>(&mut self, system: T) -> Result<&mut T> {
        self.register_system_with_signature(system, Signature::EMPTY)
    }

    /// Registers a system with its required signature.
    ///
    /// # Errors
    ///
    /// Fails if a `T` is already registered.
    pub fn register_system_with_signature<T: System + Clone>(
        &mut self,
        system: T,
        signature: Signature,
    ) -> Result<&mut T> {
        self.systems
            .register(system, signature, self.entities.iter_signatures())
    }

    /// Removes the `T` system and returns it.
    ///
    /// # Errors
    ///
    /// Fails if no `T` is registered.
    pub fn deregister_system<T: System>(&mut self) -> Result<T> {
        self.systems.deregister::<T>()
    }

    /// Sets the `T` system's signature and recomputes its membership.
    ///
    /// # Errors
    ///
    /// Fails if no `T` is registered.
    pub fn set_system_signature<T: System>(&mut self, signature: Signature) -> Result<()> {
        self.systems
            .set_signature::<T>(signature, self.entities.iter_signatures())
    }

    /// Returns the `T` system.
    ///
    /// # Errors
    ///
    /// Fails if no `T` is registered.
    pub fn system<T: System>(&self) -> Result<&T> {
        self.systems.get()
    }

    /// Returns the `T` system mutably.
    ///
    /// # Errors
    ///
    /// Fails if no `T` is registered.
    pub fn system_mut<T: System>(&mut self) -> Result<&mut T> {
        self.systems.get_mut()
    }

    /// Returns the entities the `T` system currently processes.
    ///
    /// # Errors
    ///
    /// Fails if no `T` is registered.
    pub fn system_members<T: System>(&self) -> Result<&EntitySet> {
        self.systems.members::<T>()
    }

    /// Returns the `T` system's required signature.
    ///
    /// # Errors
    ///
    /// Fails if no `T` is registered.
    pub fn system_signature<T: System>(&self) -> Result<Signature> {
        self.systems.signature::<T>()
    }

    /// Returns true if a `T` is registered.
    #[must_use]
    pub fn has_system<T: System>(&self) -> bool {
        self.systems.contains::<T>()
    }

    /// Iterates system names in run order.
    pub fn system_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.names()
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Runs one frame: every system's `on_update`, in registration order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing system; the error names it and the frame.
    pub fn on_update(&mut self, ts: Timestep) -> Result<()> {
        self.frame += 1;
        self.dispatch(|system, ctx| system.on_update(ctx, ts))
    }

    /// Delivers an event to every system in registration order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing system.
    pub fn on_event(&mut self, event: &Event) -> Result<()> {
        self.dispatch(|system, ctx| system.on_event(ctx, event))
    }

    fn dispatch<F>(&mut self, mut call: F) -> Result<()>
    where
        F: FnMut(&mut dyn System, &mut SystemContext<'_>) -> Result<()>,
    {
        for position in 0..self.systems.len() {
            let Some(mut system) = self.systems.take(position) else {
                continue;
            };
            let result = call(&mut *system, &mut SystemContext::new(self, position));
            let name = system.name();
            self.systems.put_back(position, system);
            result.map_err(|err| err.in_layer(name, self.frame))?;
        }
        Ok(())
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Captures an independent deep copy of the whole world.
    #[must_use]
    pub fn snapshot(&self) -> World {
        debug!(
            "snapshot at frame {} ({} entities, {} systems)",
            self.frame,
            self.entities.len(),
            self.systems.len()
        );
        self.clone()
    }

    /// Replaces this world with a copy of `snapshot`.
    ///
    /// The snapshot itself is untouched and can be restored again.
    pub fn restore(&mut self, snapshot: &World) {
        debug!(
            "restoring frame {} over frame {}",
            snapshot.frame, self.frame
        );
        self.clone_from(snapshot);
    }
}
