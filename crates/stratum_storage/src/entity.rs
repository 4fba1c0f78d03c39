//! Entity presence tracking.
//!
//! The `EntityStore` issues keys sequentially and records one presence flag
//! per issued key. Erasing an entity tombstones its flag; keys are never
//! reused and the flag vector is only ever appended to or truncated.

use stratum_foundation::{EntityKey, Error, Result};

/// Manages entity keys and their presence flags.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    /// Presence flag for each issued key; `false` means tombstoned.
    alive: Vec<bool>,
    /// Count of live entities.
    live_count: usize,
}

impl EntityStore {
    /// Creates a new empty entity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next key, live.
    pub fn spawn(&mut self) -> EntityKey {
        let key = EntityKey::from_index(self.alive.len());
        self.alive.push(true);
        self.live_count += 1;
        key
    }

    /// Tombstones a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key was never issued or is already erased.
    pub fn destroy(&mut self, key: EntityKey) -> Result<()> {
        self.validate(key)?;
        self.alive[key.index()] = false;
        self.live_count -= 1;
        Ok(())
    }

    /// Checks if a key is issued and live.
    #[must_use]
    pub fn exists(&self, key: EntityKey) -> bool {
        self.alive.get(key.index()).copied().unwrap_or(false)
    }

    /// Validates that a key is live.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` for keys never issued and `EntityErased`
    /// for tombstoned keys.
    pub fn validate(&self, key: EntityKey) -> Result<()> {
        match self.alive.get(key.index()) {
            None => Err(Error::entity_not_found(key)),
            Some(false) => Err(Error::entity_erased(key)),
            Some(true) => Ok(()),
        }
    }

    /// Returns the number of keys ever issued and not truncated away.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    /// Returns true if no keys have been issued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Appends live keys until `len` keys exist. No-op if already that long.
    pub fn grow(&mut self, len: usize) {
        if len > self.alive.len() {
            self.live_count += len - self.alive.len();
            self.alive.resize(len, true);
        }
    }

    /// Drops every key at or past `len`.
    ///
    /// Callers tombstone those keys elsewhere first; this only shortens the
    /// flag vector.
    pub fn truncate(&mut self, len: usize) {
        if len < self.alive.len() {
            let dropped = self.alive[len..].iter().filter(|&&alive| alive).count();
            self.live_count -= dropped;
            self.alive.truncate(len);
        }
    }

    /// Returns the first live key after `key`, or the end position.
    ///
    /// `EntityKey::INVALID` counts as the position before key 0. The end
    /// position is the key equal to [`EntityStore::len`].
    #[must_use]
    pub fn next_live(&self, key: EntityKey) -> EntityKey {
        let len = self.alive.len();
        let start = key.next().index();
        let found = self
            .alive
            .get(start..)
            .and_then(|rest| rest.iter().position(|&alive| alive))
            .map_or(len, |offset| start + offset);
        EntityKey::from_index(found)
    }

    /// Returns the last live key below `bound`, if any.
    ///
    /// Bounds past [`EntityStore::len`] search the whole store.
    #[must_use]
    pub fn prev_live(&self, bound: usize) -> Option<EntityKey> {
        let end = bound.min(self.alive.len());
        self.alive[..end]
            .iter()
            .rposition(|&alive| alive)
            .map(EntityKey::from_index)
    }

    /// Iterates over all live keys.
    pub fn iter(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(index, _)| EntityKey::from_index(index))
    }
}
