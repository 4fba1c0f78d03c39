//! Entity keys.

// Keys are 32-bit; indices beyond that range are treated as exhaustion.
#![allow(clippy::cast_possible_truncation)]

use std::fmt;

/// Dense identifier of an entity within a repository.
///
/// Keys are issued sequentially from 0 and are never reused: erasing an
/// entity tombstones its key rather than recycling it.
///
/// [`EntityKey::INVALID`] is reserved as the "no entity" sentinel. Advancing
/// from it wraps around to key 0, so a cursor parked on `INVALID` sits one
/// position before the first key.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntityKey(u32);

impl EntityKey {
    /// Sentinel value representing "no entity".
    pub const INVALID: EntityKey = EntityKey(u32::MAX);

    /// Creates a key from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Creates a key from a storage index.
    ///
    /// # Panics
    ///
    /// Panics if the index does not fit the key space.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index).expect("entity key space exhausted");
        assert!(raw != u32::MAX, "entity key space exhausted");
        Self(raw)
    }

    /// Returns the raw value of this key.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the key as an index into per-entity storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this is the [`EntityKey::INVALID`] sentinel.
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        self.0 == u32::MAX
    }

    /// Returns the key immediately after this one.
    ///
    /// `INVALID` wraps to key 0.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl Default for EntityKey {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<u32> for EntityKey {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            write!(f, "EntityKey(invalid)")
        } else {
            write!(f, "EntityKey({})", self.0)
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            write!(f, "Entity(invalid)")
        } else {
            write!(f, "Entity({})", self.0)
        }
    }
}
