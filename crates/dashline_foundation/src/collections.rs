//! Persistent entity set with structural sharing.
//!
//! A thin wrapper around `im::OrdSet`: iteration is ordered by entity id and
//! cloning is O(1), so a system can walk a copy of its membership while the
//! world it belongs to keeps changing underneath.

use std::fmt;
use std::iter::FromIterator;

use crate::entity::Entity;

/// Ordered, persistent set of entities.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EntitySet(im::OrdSet<Entity>);

impl EntitySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(im::OrdSet::new())
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the set contains `entity`.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.0.contains(&entity)
    }

    /// Inserts an entity. Returns true if it was not already present.
    pub fn insert(&mut self, entity: Entity) -> bool {
        self.0.insert(entity).is_none()
    }

    /// Removes an entity. Returns true if it was present.
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.0.remove(&entity).is_some()
    }

    /// Removes every entity.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the entity with the lowest id.
    #[must_use]
    pub fn first(&self) -> Option<Entity> {
        self.0.get_min().copied()
    }

    /// Iterates entities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.0.iter().copied()
    }

    /// Collects the entities into a vector, in ascending id order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Entity> {
        self.iter().collect()
    }
}

impl fmt::Debug for EntitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Entity> for EntitySet {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EntitySet {
    type Item = Entity;
    type IntoIter = std::iter::Copied<im::ordset::Iter<'a, Entity>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
