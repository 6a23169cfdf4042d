//! Packed, type-erased component storage.
//!
//! Each registered component kind gets one [`ComponentArray`]: a dense vector
//! of values plus entity/slot index maps. Removal swaps the last live value
//! into the hole, so the array never has gaps but also never keeps insertion
//! order.
//!
//! The [`ComponentRegistry`] holds every array behind the [`ComponentColumn`]
//! trait object, which only knows lifecycle operations (clone, entity
//! destroyed). Typed access goes back through the kind's `TypeId`.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

use dashline_foundation::{ComponentType, Entity, Error, ErrorKind, MAX_COMPONENTS, Result};

/// Marker for types that can be stored as components.
///
/// Components are plain values. `Clone` is what makes world snapshots possible.
pub trait Component: Clone + 'static {}

impl<T: Clone + 'static> Component for T {}

// =============================================================================
// Component Array
// =============================================================================

/// Dense storage for one component kind.
#[derive(Clone)]
pub struct ComponentArray<T> {
    /// Packed component values.
    values: Vec<T>,
    /// Slot -> owning entity, parallel to `values`.
    entities: Vec<Entity>,
    /// Entity -> slot.
    slots: HashMap<Entity, usize>,
}

impl<T: Component> Default for ComponentArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentArray<T> {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            entities: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Creates an empty array with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            entities: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Appends a component for `entity`.
    ///
    /// # Errors
    ///
    /// Returns `ComponentAlreadyPresent` if the entity already has one.
    pub fn insert(&mut self, entity: Entity, value: T) -> Result<()> {
        if self.slots.contains_key(&entity) {
            return Err(Error::component_present(entity, type_name::<T>()));
        }
        self.slots.insert(entity, self.values.len());
        self.entities.push(entity);
        self.values.push(value);
        Ok(())
    }

    /// Removes and returns the component for `entity`.
    ///
    /// The last value in the array moves into the freed slot.
    ///
    /// # Errors
    ///
    /// Returns `ComponentMissing` if the entity has no component here.
    pub fn remove(&mut self, entity: Entity) -> Result<T> {
        let slot = self
            .slots
            .remove(&entity)
            .ok_or_else(|| Error::component_missing(entity, type_name::<T>()))?;

        let value = self.values.swap_remove(slot);
        self.entities.swap_remove(slot);

        // Repoint whichever entity was moved into the hole
        if let Some(&moved) = self.entities.get(slot) {
            self.slots.insert(moved, slot);
        }

        Ok(value)
    }

    /// Returns the component for `entity`.
    ///
    /// # Errors
    ///
    /// Returns `ComponentMissing` if absent.
    pub fn get(&self, entity: Entity) -> Result<&T> {
        self.try_get(entity)
            .ok_or_else(|| Error::component_missing(entity, type_name::<T>()))
    }

    /// Returns the component for `entity` mutably.
    ///
    /// The reference is only good until the next insert or remove on this
    /// array, since a removal can move any value.
    ///
    /// # Errors
    ///
    /// Returns `ComponentMissing` if absent.
    pub fn get_mut(&mut self, entity: Entity) -> Result<&mut T> {
        match self.slots.get(&entity) {
            Some(&slot) => Ok(&mut self.values[slot]),
            None => Err(Error::component_missing(entity, type_name::<T>())),
        }
    }

    /// Returns the component for `entity`, if present.
    #[must_use]
    pub fn try_get(&self, entity: Entity) -> Option<&T> {
        self.slots.get(&entity).map(|&slot| &self.values[slot])
    }

    /// Checks if `entity` has a component here.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.slots.contains_key(&entity)
    }

    /// Removes the entity's component if there is one.
    ///
    /// Returns true if something was removed.
    pub fn entity_destroyed(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_ok()
    }

    /// Returns the number of stored components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the slot an entity's value lives in.
    #[must_use]
    pub fn slot_of(&self, entity: Entity) -> Option<usize> {
        self.slots.get(&entity).copied()
    }

    /// Returns the owning entities in dense order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns the packed values.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterates `(entity, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        self.entities.iter().copied().zip(self.values.iter())
    }

    /// Iterates `(entity, value)` pairs mutably in dense order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
        self.entities.iter().copied().zip(self.values.iter_mut())
    }
}

impl<T> fmt::Debug for ComponentArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentArray")
            .field("component", &type_name::<T>())
            .field("entities", &self.entities)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Type-Erased Column
// =============================================================================

/// Lifecycle operations shared by every component array.
pub trait ComponentColumn: Any {
    /// Name of the stored component type.
    fn component_name(&self) -> &'static str;

    /// Number of stored components.
    fn len(&self) -> usize;

    /// Returns true if no component is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if `entity` has a component in this column.
    fn contains(&self, entity: Entity) -> bool;

    /// Removes the entity's component if present. Idempotent.
    fn entity_destroyed(&mut self, entity: Entity) -> bool;

    /// Deep-copies the column into independent storage.
    fn clone_column(&self) -> Box<dyn ComponentColumn>;

    /// Upcast for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentColumn for ComponentArray<T> {
    fn component_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn contains(&self, entity: Entity) -> bool {
        self.slots.contains_key(&entity)
    }

    fn entity_destroyed(&mut self, entity: Entity) -> bool {
        ComponentArray::entity_destroyed(self, entity)
    }

    fn clone_column(&self) -> Box<dyn ComponentColumn> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// =============================================================================
// Component Registry
// =============================================================================

/// Owns one column per registered component kind.
///
/// Kinds are numbered in registration order; the number doubles as the kind's
/// bit in a [`Signature`](dashline_foundation::Signature).
pub struct ComponentRegistry {
    /// Rust type -> assigned kind.
    types: HashMap<TypeId, ComponentType>,
    /// Columns indexed by kind.
    columns: Vec<Box<dyn ComponentColumn>>,
    /// Initial capacity for new columns.
    capacity: usize,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty registry whose columns preallocate `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            types: HashMap::new(),
            columns: Vec::new(),
            capacity,
        }
    }

    /// Registers component kind `T` and returns its assigned type.
    ///
    /// # Errors
    ///
    /// Returns an error if `T` is already registered or all
    /// [`MAX_COMPONENTS`] kinds are taken.
    pub fn register<T: Component>(&mut self) -> Result<ComponentType> {
        if self.types.contains_key(&TypeId::of::<T>()) {
            return Err(Error::new(ErrorKind::ComponentAlreadyRegistered(
                type_name::<T>(),
            )));
        }
        let ty = ComponentType::try_new(self.columns.len()).ok_or_else(|| {
            Error::new(ErrorKind::ComponentLimitReached {
                limit: MAX_COMPONENTS,
                component: type_name::<T>(),
            })
        })?;

        self.types.insert(TypeId::of::<T>(), ty);
        self.columns
            .push(Box::new(ComponentArray::<T>::with_capacity(self.capacity)));
        Ok(ty)
    }

    /// Returns true if `T` is registered.
    #[must_use]
    pub fn is_registered<T: Component>(&self) -> bool {
        self.types.contains_key(&TypeId::of::<T>())
    }

    /// Returns the kind assigned to `T`.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` if `T` was never registered.
    pub fn component_type<T: Component>(&self) -> Result<ComponentType> {
        self.types
            .get(&TypeId::of::<T>())
            .copied()
            .ok_or_else(|| Error::component_not_registered(type_name::<T>()))
    }

    /// Returns the typed array for `T`.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` if `T` was never registered.
    pub fn array<T: Component>(&self) -> Result<&ComponentArray<T>> {
        let ty = self.component_type::<T>()?;
        self.columns[ty.index()]
            .as_any()
            .downcast_ref()
            .ok_or_else(|| Self::mismatch::<T>(ty))
    }

    /// Returns the typed array for `T` mutably.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` if `T` was never registered.
    pub fn array_mut<T: Component>(&mut self) -> Result<&mut ComponentArray<T>> {
        let ty = self.component_type::<T>()?;
        self.columns[ty.index()]
            .as_any_mut()
            .downcast_mut()
            .ok_or_else(|| Self::mismatch::<T>(ty))
    }

    /// Inserts a component and returns its kind.
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered or the entity already has one.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) -> Result<ComponentType> {
        let ty = self.component_type::<T>()?;
        self.array_mut::<T>()?.insert(entity, value)?;
        Ok(ty)
    }

    /// Removes a component and returns it with its kind.
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered or the entity has none.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Result<(ComponentType, T)> {
        let ty = self.component_type::<T>()?;
        let value = self.array_mut::<T>()?.remove(entity)?;
        Ok((ty, value))
    }

    /// Returns an entity's component.
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered or the entity has none.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.array::<T>()?.get(entity)
    }

    /// Returns an entity's component mutably.
    ///
    /// # Errors
    ///
    /// Fails if `T` is unregistered or the entity has none.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.array_mut::<T>()?.get_mut(entity)
    }

    /// Tells every column that `entity` is gone.
    ///
    /// Returns how many components were dropped.
    pub fn entity_destroyed(&mut self, entity: Entity) -> usize {
        self.columns
            .iter_mut()
            .map(|column| column.entity_destroyed(entity))
            .filter(|&removed| removed)
            .count()
    }

    /// Returns the number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no kind is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the type name registered under `ty`.
    #[must_use]
    pub fn name(&self, ty: ComponentType) -> Option<&'static str> {
        self.columns.get(ty.index()).map(|c| c.component_name())
    }

    /// Iterates `(kind, column)` in registration order.
    pub fn columns(&self) -> impl Iterator<Item = (ComponentType, &dyn ComponentColumn)> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(i, c)| ComponentType::try_new(i).map(|ty| (ty, c.as_ref())))
    }

    fn mismatch<T>(ty: ComponentType) -> Error {
        Error::new(ErrorKind::Internal(format!(
            "column {ty} does not hold {}",
            type_name::<T>()
        )))
    }
}

/// Deep copy: every column is cloned into independent storage.
impl Clone for ComponentRegistry {
    fn clone(&self) -> Self {
        Self {
            types: self.types.clone(),
            columns: self.columns.iter().map(|c| c.clone_column()).collect(),
            capacity: self.capacity,
        }
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.columns().map(|(ty, c)| (ty, (c.component_name(), c.len()))))
            .finish()
    }
}
