//! Systems and the registry that routes lifecycle calls to them.
//!
//! A system declares a required [`Signature`] and keeps a membership set of
//! every live entity whose signature contains it. The registry maintains that
//! set incrementally and fires `on_entity_added` / `on_entity_removed` only when
//! an entity actually enters or leaves.
//!
//! Systems run in registration order. During its own update or event pass a
//! system is moved out of its slot so it can borrow the world mutably through
//! a [`SystemContext`]; membership changes addressed to it meanwhile are queued
//! and replayed when it is put back.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

use dashline_foundation::{Entity, EntitySet, Error, ErrorKind, Event, Result, Signature, Timestep};
use log::{debug, trace};

use crate::context::SystemContext;

/// Object-safe plumbing every system gets for free.
///
/// Implemented for any `System + Clone`, so concrete systems only derive
/// `Clone` and never write these by hand.
pub trait SystemObject: Any {
    /// Clones the system, including all private state, into a new box.
    fn clone_box(&self) -> Box<dyn System>;

    /// Upcast for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Owned upcast, used when a system is deregistered.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: System + Clone> SystemObject for T {
    fn clone_box(&self) -> Box<dyn System> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Per-frame behavior over the entities matching a signature.
///
/// Every hook has an empty default, so a system implements only what it uses.
pub trait System: SystemObject {
    /// Display name, used in logs and error context.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Runs once per frame.
    ///
    /// # Errors
    ///
    /// Errors abort the frame and propagate out of [`World::on_update`](crate::World::on_update).
    fn on_update(&mut self, ctx: &mut SystemContext<'_>, ts: Timestep) -> Result<()> {
        let _ = (ctx, ts);
        Ok(())
    }

    /// Handles an input or window event.
    ///
    /// # Errors
    ///
    /// Errors propagate out of [`World::on_event`](crate::World::on_event).
    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &Event) -> Result<()> {
        let _ = (ctx, event);
        Ok(())
    }

    /// An entity started matching this system's signature.
    fn on_entity_added(&mut self, entity: Entity) {
        let _ = entity;
    }

    /// An entity stopped matching, or was destroyed while a member.
    fn on_entity_removed(&mut self, entity: Entity) {
        let _ = entity;
    }
}

impl Clone for Box<dyn System> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

impl fmt::Debug for dyn System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A membership transition for one system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MembershipChange {
    /// Absent -> Member.
    Added(Entity),
    /// Member -> Absent.
    Removed(Entity),
}

impl MembershipChange {
    /// The entity that joined or left.
    #[must_use]
    pub const fn entity(self) -> Entity {
        match self {
            Self::Added(entity) | Self::Removed(entity) => entity,
        }
    }
}

// =============================================================================
// Slots
// =============================================================================

#[derive(Clone)]
struct SystemSlot {
    type_id: TypeId,
    name: &'static str,
    signature: Signature,
    members: EntitySet,
    /// `None` while the system runs its own pass.
    system: Option<Box<dyn System>>,
    /// Changes that arrived while `system` was out.
    pending: Vec<MembershipChange>,
}

impl SystemSlot {
    fn notify(&mut self, change: MembershipChange) {
        trace!("{}: {change:?}", self.name);
        match &mut self.system {
            Some(system) => match change {
                MembershipChange::Added(entity) => system.on_entity_added(entity),
                MembershipChange::Removed(entity) => system.on_entity_removed(entity),
            },
            None => self.pending.push(change),
        }
    }

    /// Re-evaluates one entity and fires the transition, if any.
    fn evaluate(&mut self, entity: Entity, signature: Signature) {
        if signature.matches(self.signature) {
            if self.members.insert(entity) {
                self.notify(MembershipChange::Added(entity));
            }
        } else if self.members.remove(entity) {
            self.notify(MembershipChange::Removed(entity));
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Owns every registered system with its signature and membership.
///
/// Cloning deep-copies each system through [`SystemObject::clone_box`].
#[derive(Clone, Default)]
pub struct SystemRegistry {
    /// Slots in registration order.
    slots: Vec<SystemSlot>,
    /// System type -> slot index.
    index: HashMap<TypeId, usize>,
}

impl SystemRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `system` with a required signature.
    ///
    /// `live` lists every live entity and its signature; the matching ones
    /// become members right away and fire `on_entity_added`.
    ///
    /// # Errors
    ///
    /// Returns `SystemAlreadyRegistered` if a `T` is already present.
    pub fn register<T: System + Clone>(
        &mut self,
        system: T,
        signature: Signature,
        live: impl IntoIterator<Item = (Entity, Signature)>,
    ) -> Result<&mut T> {
        let type_id = TypeId::of::<T>();
        if self.index.contains_key(&type_id) {
            return Err(Error::new(ErrorKind::SystemAlreadyRegistered(
                type_name::<T>(),
            )));
        }

        let mut slot = SystemSlot {
            type_id,
            name: system.name(),
            signature,
            members: EntitySet::new(),
            system: Some(Box::new(system)),
            pending: Vec::new(),
        };
        for (entity, entity_signature) in live {
            slot.evaluate(entity, entity_signature);
        }
        debug!(
            "registered system {} with signature {} ({} members)",
            slot.name,
            slot.signature,
            slot.members.len()
        );

        let position = self.slots.len();
        self.slots.push(slot);
        self.index.insert(type_id, position);
        self.typed_mut::<T>(position)
    }

    /// Removes the `T` system and returns it.
    ///
    /// No removal hooks fire; the system simply stops existing.
    ///
    /// # Errors
    ///
    /// Returns `SystemNotRegistered` if absent, `SystemBusy` if it is running.
    pub fn deregister<T: System>(&mut self) -> Result<T> {
        let position = self.position::<T>()?;
        if self.slots[position].system.is_none() {
            return Err(Error::new(ErrorKind::SystemBusy(type_name::<T>())));
        }

        let slot = self.slots.remove(position);
        self.reindex();
        debug!("deregistered system {}", slot.name);

        let boxed = slot
            .system
            .ok_or_else(|| Error::new(ErrorKind::SystemBusy(type_name::<T>())))?;
        boxed
            .into_any()
            .downcast::<T>()
            .map(|system| *system)
            .map_err(|_| Self::mismatch::<T>())
    }

    /// Replaces the `T` system's signature and recomputes its membership.
    ///
    /// # Errors
    ///
    /// Returns `SystemNotRegistered` if absent.
    pub fn set_signature<T: System>(
        &mut self,
        signature: Signature,
        live: impl IntoIterator<Item = (Entity, Signature)>,
    ) -> Result<()> {
        let position = self.position::<T>()?;
        let slot = &mut self.slots[position];
        slot.signature = signature;
        for (entity, entity_signature) in live {
            slot.evaluate(entity, entity_signature);
        }
        debug!("{} signature set to {signature}", slot.name);
        Ok(())
    }

    /// Re-evaluates `entity` against every system.
    pub fn entity_signature_changed(&mut self, entity: Entity, signature: Signature) {
        for slot in &mut self.slots {
            slot.evaluate(entity, signature);
        }
    }

    /// Drops `entity` from every membership set, firing `on_entity_removed`
    /// for each system it belonged to.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for slot in &mut self.slots {
            if slot.members.remove(entity) {
                slot.notify(MembershipChange::Removed(entity));
            }
        }
    }

    /// Moves the system at `position` out for its pass.
    ///
    /// Returns `None` if the position is empty or the system is already out.
    pub fn take(&mut self, position: usize) -> Option<Box<dyn System>> {
        self.slots.get_mut(position)?.system.take()
    }

    /// Returns a taken system to its slot and replays queued notifications.
    pub fn put_back(&mut self, position: usize, mut system: Box<dyn System>) {
        let Some(slot) = self.slots.get_mut(position) else {
            return;
        };
        for change in slot.pending.drain(..) {
            match change {
                MembershipChange::Added(entity) => system.on_entity_added(entity),
                MembershipChange::Removed(entity) => system.on_entity_removed(entity),
            }
        }
        slot.system = Some(system);
    }

    /// Returns the `T` system.
    ///
    /// # Errors
    ///
    /// Returns `SystemNotRegistered` if absent, `SystemBusy` if it is running.
    pub fn get<T: System>(&self) -> Result<&T> {
        let position = self.position::<T>()?;
        self.slots[position]
            .system
            .as_ref()
            .ok_or_else(|| Error::new(ErrorKind::SystemBusy(type_name::<T>())))?
            .as_any()
            .downcast_ref()
            .ok_or_else(Self::mismatch::<T>)
    }

    /// Returns the `T` system mutably.
    ///
    /// # Errors
    ///
    /// Returns `SystemNotRegistered` if absent, `SystemBusy` if it is running.
    pub fn get_mut<T: System>(&mut self) -> Result<&mut T> {
        let position = self.position::<T>()?;
        self.typed_mut::<T>(position)
    }

    /// Returns true if a `T` is registered.
    #[must_use]
    pub fn contains<T: System>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<T>())
    }

    /// Returns the `T` system's membership.
    ///
    /// # Errors
    ///
    /// Returns `SystemNotRegistered` if absent.
    pub fn members<T: System>(&self) -> Result<&EntitySet> {
        let position = self.position::<T>()?;
        Ok(&self.slots[position].members)
    }

    /// Returns the `T` system's required signature.
    ///
    /// # Errors
    ///
    /// Returns `SystemNotRegistered` if absent.
    pub fn signature<T: System>(&self) -> Result<Signature> {
        let position = self.position::<T>()?;
        Ok(self.slots[position].signature)
    }

    /// Returns the membership of the system at `position`.
    #[must_use]
    pub fn members_at(&self, position: usize) -> Option<&EntitySet> {
        self.slots.get(position).map(|slot| &slot.members)
    }

    /// Returns the name of the system at `position`.
    #[must_use]
    pub fn name_at(&self, position: usize) -> Option<&'static str> {
        self.slots.get(position).map(|slot| slot.name)
    }

    /// Iterates system names in run order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|slot| slot.name)
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no system is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn position<T: System>(&self) -> Result<usize> {
        self.index
            .get(&TypeId::of::<T>())
            .copied()
            .ok_or_else(|| Error::system_not_registered(type_name::<T>()))
    }

    fn typed_mut<T: System>(&mut self, position: usize) -> Result<&mut T> {
        self.slots[position]
            .system
            .as_mut()
            .ok_or_else(|| Error::new(ErrorKind::SystemBusy(type_name::<T>())))?
            .as_any_mut()
            .downcast_mut()
            .ok_or_else(Self::mismatch::<T>)
    }

    fn reindex(&mut self) {
        self.index = self
            .slots
            .iter()
            .enumerate()
            .map(|(position, slot)| (slot.type_id, position))
            .collect();
    }

    fn mismatch<T>() -> Error {
        Error::new(ErrorKind::Internal(format!(
            "system slot does not hold {}",
            type_name::<T>()
        )))
    }
}

impl fmt::Debug for SystemRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.slots
                    .iter()
                    .map(|slot| (slot.name, slot.signature, slot.members.len())),
            )
            .finish()
    }
}
