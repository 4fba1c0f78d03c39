//! Fixed-capacity storage blocks.
//!
//! A block reserves its full capacity when created and is never pushed past
//! it, so the backing buffer never reallocates and every slot keeps its
//! address for the life of the block.

// Block and offset positions are bounded by the 32-bit key space.
#![allow(clippy::cast_possible_truncation)]

use stratum_foundation::EntityKey;

/// Location of a value inside a column's blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SlotRef {
    block: u32,
    offset: u32,
}

impl SlotRef {
    pub(crate) fn new(block: usize, offset: usize) -> Self {
        Self {
            block: block as u32,
            offset: offset as u32,
        }
    }

    pub(crate) const fn block(self) -> usize {
        self.block as usize
    }

    pub(crate) const fn offset(self) -> usize {
        self.offset as usize
    }
}

/// One storage slot. Erased slots keep their place with `value: None`.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) key: EntityKey,
    pub(crate) value: Option<T>,
}

/// A buffer of at most `capacity` slots that never relocates.
#[derive(Debug)]
pub(crate) struct Block<T> {
    pub(crate) slots: Vec<Slot<T>>,
    capacity: usize,
}

impl<T> Block<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Places a value in the next free slot.
    ///
    /// The caller must check [`Block::is_full`] first; pushing into a full
    /// block would move every slot.
    pub(crate) fn push(&mut self, key: EntityKey, value: T) -> &mut T {
        debug_assert!(!self.is_full(), "push into a full block");
        let offset = self.slots.len();
        self.slots.push(Slot { key, value: None });
        self.slots[offset].value.insert(value)
    }

    /// Assigns over an occupied or erased slot in place.
    pub(crate) fn overwrite(&mut self, offset: usize, value: T) -> &mut T {
        self.slots[offset].value.insert(value)
    }

    pub(crate) fn get(&self, offset: usize) -> Option<&T> {
        self.slots.get(offset)?.value.as_ref()
    }

    pub(crate) fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        self.slots.get_mut(offset)?.value.as_mut()
    }

    pub(crate) fn take(&mut self, offset: usize) -> Option<T> {
        self.slots.get_mut(offset)?.value.take()
    }
}
