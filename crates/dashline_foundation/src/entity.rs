//! Entity identifiers with generational indices.

use std::fmt;

/// Entity identifier with a generation counter for stale reference detection.
///
/// Indices are small and dense so they can be used directly as array indices.
/// The generation changes every time an index is freed or reused, so a handle
/// kept across a destroy never aliases the entity that later reuses its slot.
///
/// Odd generations are alive, even generations are free.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Entity {
    /// Index into entity storage.
    pub index: u32,
    /// Generation counter for stale reference detection.
    pub generation: u32,
}

impl Entity {
    /// Creates a new entity handle with the given index and generation.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns a sentinel value representing "no entity".
    #[must_use]
    pub const fn null() -> Self {
        Self {
            index: u32::MAX,
            generation: 0,
        }
    }

    /// Returns true if this is the null sentinel value.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.index == u32::MAX
    }

    /// Returns the index as a `usize` for array access.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.index as usize
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({}v{})", self.index, self.generation)
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({})", self.index)
        }
    }
}
