//! Configuration for column storage.

use crate::{Error, Result};

/// Capacity of the first block of a fresh column, and the floor for every
/// block allocated after it.
pub const DEFAULT_BLOCK_CAPACITY: usize = 8;

/// Block growth parameters for column storage.
///
/// A column starts with one block of `initial_block_capacity` slots. When the
/// newest block is full, the next one holds
/// `max(min_block_capacity, previous_capacity * 2)` slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Capacity of the first block of a new column.
    pub initial_block_capacity: usize,

    /// Lower bound on the capacity of every subsequent block.
    pub min_block_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_block_capacity: DEFAULT_BLOCK_CAPACITY,
            min_block_capacity: DEFAULT_BLOCK_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration for many sparsely-populated component types.
    ///
    /// Columns start with a single slot and double from there.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            initial_block_capacity: 1,
            min_block_capacity: 1,
        }
    }

    /// Builder method to set the first block's capacity.
    #[must_use]
    pub fn with_initial_block_capacity(mut self, capacity: usize) -> Self {
        self.initial_block_capacity = capacity;
        self
    }

    /// Builder method to set the minimum capacity of later blocks.
    #[must_use]
    pub fn with_min_block_capacity(mut self, capacity: usize) -> Self {
        self.min_block_capacity = capacity;
        self
    }

    /// Returns the capacity of the block that follows one of `previous` slots.
    ///
    /// Never returns zero, even for a zero minimum.
    #[must_use]
    pub fn next_block_capacity(&self, previous: usize) -> usize {
        self.min_block_capacity
            .max(1)
            .max(previous.saturating_mul(2))
    }

    /// Checks that the configuration can drive block growth.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_block_capacity` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.min_block_capacity == 0 {
            return Err(Error::invalid_config(
                "min_block_capacity must be at least 1",
            ));
        }
        Ok(())
    }
}
