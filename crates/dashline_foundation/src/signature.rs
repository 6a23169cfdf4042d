//! Component-kind identifiers and signature bitsets.
//!
//! A [`Signature`] records which component kinds an entity carries, or which
//! kinds a system requires. An entity belongs to a system exactly when its
//! signature [`matches`](Signature::matches) the system's signature.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

use crate::MAX_COMPONENTS;

/// Small integer identifying a registered component kind.
///
/// Assigned from a monotonically increasing counter when the kind is
/// registered with a world, and stable for that world's lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentType(u8);

impl ComponentType {
    /// Creates a component type from its raw index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`MAX_COMPONENTS`].
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < MAX_COMPONENTS, "component type out of range");
        Self(index)
    }

    /// Creates a component type, returning `None` if `index` is out of range.
    #[must_use]
    pub const fn try_new(index: usize) -> Option<Self> {
        if index < MAX_COMPONENTS {
            #[allow(clippy::cast_possible_truncation)]
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fixed-width bitset over component kinds.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature(u32);

impl Signature {
    /// The empty signature.
    pub const EMPTY: Self = Self(0);

    /// Creates an empty signature.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a signature from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Creates a signature with the given kinds set.
    #[must_use]
    pub fn of(types: &[ComponentType]) -> Self {
        types.iter().fold(Self::EMPTY, |sig, ty| sig.with(*ty))
    }

    /// Returns a copy with `ty` set.
    #[must_use]
    pub const fn with(self, ty: ComponentType) -> Self {
        Self(self.0 | (1 << ty.0))
    }

    /// Returns a copy with `ty` cleared.
    #[must_use]
    pub const fn without(self, ty: ComponentType) -> Self {
        Self(self.0 & !(1 << ty.0))
    }

    /// Sets the bit for `ty`.
    pub fn set(&mut self, ty: ComponentType) {
        *self = self.with(ty);
    }

    /// Clears the bit for `ty`.
    pub fn clear(&mut self, ty: ComponentType) {
        *self = self.without(ty);
    }

    /// Clears every bit.
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Returns true if the bit for `ty` is set.
    #[must_use]
    pub const fn contains(self, ty: ComponentType) -> bool {
        self.0 & (1 << ty.0) != 0
    }

    /// Returns true if every kind in `required` is also set here.
    ///
    /// This is the system membership test: `(self & required) == required`.
    /// The empty signature is matched by every signature.
    #[must_use]
    pub const fn matches(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// Returns the number of kinds set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if no kind is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the set kinds in ascending order.
    pub fn iter(self) -> impl Iterator<Item = ComponentType> {
        (0..MAX_COMPONENTS)
            .filter_map(ComponentType::try_new)
            .filter(move |ty| self.contains(*ty))
    }
}

impl BitAnd for Signature {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Signature {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Signature {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Signature {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<ComponentType> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(ComponentType::index)).finish()
    }
}

/// Formats like a fixed-width bitset, highest kind first.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.0, width = MAX_COMPONENTS)
    }
}
