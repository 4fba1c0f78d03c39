//! Per-type component columns with stable value addresses.
//!
//! A [`Column<T>`] stores values in a list of fixed-capacity blocks plus a
//! sparse index from entity key to slot location. Blocks are never resized
//! or moved: when the newest one fills up a larger block is appended, so a
//! value keeps its address until its key is erased, the column is dropped,
//! or the column is replaced by a clone.

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use log::trace;
use stratum_foundation::{EntityKey, StoreConfig};

use crate::block::{Block, SlotRef};

/// Block-allocated storage for values of one type, indexed by entity key.
pub struct Column<T> {
    /// Storage blocks, oldest first. Only the last one accepts new values.
    blocks: Vec<Block<T>>,
    /// Slot location for each entity key, `None` if the key has no value.
    sparse: Vec<Option<SlotRef>>,
    /// Number of occupied sparse entries.
    live: usize,
    /// Block growth parameters.
    config: StoreConfig,
}

impl<T> Default for Column<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Column<T> {
    /// Creates an empty column with the default block sizes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty column with the given block sizes.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            blocks: vec![Block::with_capacity(config.initial_block_capacity)],
            sparse: Vec::new(),
            live: 0,
            config,
        }
    }

    fn resolve(&self, index: usize, slot: Option<SlotRef>) -> Option<(EntityKey, &T)> {
        let slot = slot?;
        let value = self.blocks.get(slot.block())?.get(slot.offset())?;
        Some((EntityKey::from_index(index), value))
    }

    fn slot(&self, key: EntityKey) -> Option<SlotRef> {
        self.sparse.get(key.index()).copied().flatten()
    }

    /// Returns the index of a block with a free slot, appending one if needed.
    fn writable_block(&mut self) -> usize {
        let last = self.blocks.len() - 1;
        if !self.blocks[last].is_full() {
            return last;
        }

        let capacity = self
            .config
            .next_block_capacity(self.blocks[last].capacity());
        trace!(
            "column<{}>: allocating block {} with capacity {capacity}",
            std::any::type_name::<T>(),
            self.blocks.len()
        );
        self.blocks.push(Block::with_capacity(capacity));
        last + 1
    }

    /// Stores `value` for `key` and returns a reference to it.
    ///
    /// If `key` already has a value it is assigned over in place, keeping its
    /// address. Otherwise the value goes into a fresh slot; slots of erased
    /// keys are never reused.
    pub fn emplace(&mut self, key: EntityKey, value: T) -> &mut T {
        if let Some(slot) = self.slot(key) {
            return self.blocks[slot.block()].overwrite(slot.offset(), value);
        }

        let block = self.writable_block();
        let index = key.index();
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }
        self.sparse[index] = Some(SlotRef::new(block, self.blocks[block].len()));
        self.live += 1;
        self.blocks[block].push(key, value)
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn view(&self, key: EntityKey) -> Option<&T> {
        let slot = self.slot(key)?;
        self.blocks.get(slot.block())?.get(slot.offset())
    }

    /// Returns the value stored for `key` mutably.
    pub fn view_mut(&mut self, key: EntityKey) -> Option<&mut T> {
        let slot = self.slot(key)?;
        self.blocks.get_mut(slot.block())?.get_mut(slot.offset())
    }

    /// Removes the value stored for `key`, returning it.
    ///
    /// The slot stays allocated but empty.
    pub fn erase(&mut self, key: EntityKey) -> Option<T> {
        let slot = self.sparse.get_mut(key.index())?.take()?;
        self.live -= 1;
        self.blocks[slot.block()].take(slot.offset())
    }

    /// Returns true if `key` has a value in this column.
    #[must_use]
    pub fn contains(&self, key: EntityKey) -> bool {
        self.slot(key).is_some()
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the total slot capacity across all blocks.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.blocks.iter().map(Block::capacity).sum()
    }

    /// Returns the number of allocated blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the length of the sparse index.
    #[must_use]
    pub fn sparse_len(&self) -> usize {
        self.sparse.len()
    }

    /// Returns the block growth parameters.
    #[must_use]
    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Iterates over `(key, value)` pairs in key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            column: self,
            sparse: self.sparse.iter().enumerate(),
        }
    }

    /// Iterates mutably over `(key, value)` pairs in key order.
    ///
    /// Slots are gathered block by block and sorted by key only when keys
    /// were first assigned out of order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let mut entries: Vec<_> = self
            .blocks
            .iter_mut()
            .flat_map(|block| block.slots.iter_mut())
            .filter_map(|slot| Some((slot.key, slot.value.as_mut()?)))
            .collect();
        if !entries.is_sorted_by_key(|(key, _)| *key) {
            entries.sort_unstable_by_key(|(key, _)| *key);
        }
        IterMut {
            entries: entries.into_iter(),
        }
    }
}

impl<T: Clone> Clone for Column<T> {
    /// Deep-copies live values into a single block sized to fit them.
    ///
    /// Erased slots are dropped and every value gets a new address.
    fn clone(&self) -> Self {
        let mut block = Block::with_capacity(self.live);
        let mut sparse = vec![None; self.sparse.len()];

        for (key, value) in self.iter() {
            sparse[key.index()] = Some(SlotRef::new(0, block.len()));
            block.push(key, value.clone());
        }

        trace!(
            "column<{}>: compacted {} live values from {} blocks",
            std::any::type_name::<T>(),
            self.live,
            self.blocks.len()
        );

        Self {
            blocks: vec![block],
            sparse,
            live: self.live,
            config: self.config,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over a column's values in key order.
pub struct Iter<'a, T> {
    column: &'a Column<T>,
    sparse: std::iter::Enumerate<slice::Iter<'a, Option<SlotRef>>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            column: self.column,
            sparse: self.sparse.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (EntityKey, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let column = self.column;
        self.sparse
            .by_ref()
            .find_map(|(index, slot)| column.resolve(index, *slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.sparse.size_hint().1)
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let column = self.column;
        self.sparse
            .by_ref()
            .rev()
            .find_map(|(index, slot)| column.resolve(index, *slot))
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable iterator over a column's values in key order.
pub struct IterMut<'a, T> {
    entries: std::vec::IntoIter<(EntityKey, &'a mut T)>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = (EntityKey, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}
