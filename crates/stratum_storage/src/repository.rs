//! The entity repository.
//!
//! A `Repository` pairs an [`EntityStore`] (one presence flag per issued key)
//! with a [`ColumnSet`] (one column per component type). Entity-level
//! operations live here; typed component access goes through cursors.

use std::fmt;
use std::iter::FusedIterator;

use log::{debug, trace};
use stratum_foundation::{EntityKey, ErrorContext, Result, StoreConfig};

use crate::column::{self, Column};
use crate::column_set::ColumnSet;
use crate::component::{Bundle, Component};
use crate::cursor::{Cursor, CursorMut};
use crate::entity::EntityStore;

/// Owns entity presence and every component column.
///
/// Keys are issued sequentially from 0 and never reused. Erasing an entity
/// tombstones its key everywhere; the key space only shrinks through
/// [`Repository::resize`].
#[derive(Default)]
pub struct Repository {
    entities: EntityStore,
    columns: ColumnSet,
}

impl Repository {
    /// Creates an empty repository with default block sizes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository whose columns grow per `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `config` fails validation.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entities: EntityStore::new(),
            columns: ColumnSet::with_config(config),
        })
    }

    /// Issues a new key and returns a cursor at it.
    pub fn create(&mut self) -> CursorMut<'_> {
        let key = self.entities.spawn();
        CursorMut::new(self, key)
    }

    /// Issues a new key, assigns every value of `bundle` to it, and returns a
    /// cursor at it.
    pub fn create_with<B: Bundle>(&mut self, bundle: B) -> CursorMut<'_> {
        let mut cursor = self.create();
        cursor.emplace_bundle(bundle);
        cursor
    }

    /// Returns true if `key` was issued and has not been erased.
    #[must_use]
    pub fn contains(&self, key: EntityKey) -> bool {
        self.entities.exists(key)
    }

    /// Checks that `key` is live.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the key was never issued and
    /// `EntityErased` if it was erased.
    pub fn validate(&self, key: EntityKey) -> Result<()> {
        self.entities.validate(key)
    }

    /// Erases an entity, tombstoning its key in every column.
    ///
    /// No-op if the key is not live.
    pub fn erase(&mut self, key: EntityKey) {
        if self.entities.destroy(key).is_err() {
            return;
        }
        let removed = self.columns.erase_key(key);
        trace!("erased {key} ({removed} components)");
    }

    /// Sets the number of issued keys to `len`.
    ///
    /// Growing appends live keys with no components. Shrinking erases every
    /// key at or past `len` from all columns, then drops those keys.
    pub fn resize(&mut self, len: usize) {
        let old_len = self.entities.len();
        if len > old_len {
            self.entities.grow(len);
        } else if len < old_len {
            let removed: usize = (len..old_len)
                .map(|index| self.columns.erase_key(EntityKey::from_index(index)))
                .sum();
            self.entities.truncate(len);
            debug!("resize {old_len} -> {len}: erased {removed} components");
            return;
        }
        debug!("resize {old_len} -> {len}");
    }

    /// Returns the number of issued keys, live or erased.
    ///
    /// This is also the key of the end position.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entities.live_count()
    }

    /// Returns true if no entity is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.live_count() == 0
    }

    /// Returns a cursor at `key`, valid or not.
    #[must_use]
    pub fn at(&self, key: EntityKey) -> Cursor<'_> {
        Cursor::new(self, key)
    }

    /// Returns a mutable cursor at `key`, valid or not.
    ///
    /// Writing components through a cursor at an erased key is not checked.
    pub fn at_mut(&mut self, key: EntityKey) -> CursorMut<'_> {
        CursorMut::new(self, key)
    }

    /// Returns a cursor at `key` if it is live.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` or `EntityErased`.
    pub fn try_at(&self, key: EntityKey) -> Result<Cursor<'_>> {
        self.validate(key).map_err(|err| {
            err.with_context(ErrorContext::new().with_operation("Repository::try_at"))
        })?;
        Ok(Cursor::new(self, key))
    }

    /// Returns a cursor at the first live key, or [`Repository::end`].
    #[must_use]
    pub fn begin(&self) -> Cursor<'_> {
        let mut cursor = Cursor::new(self, EntityKey::INVALID);
        cursor.advance();
        cursor
    }

    /// Returns the end position: a cursor whose key equals [`Repository::len`].
    #[must_use]
    pub fn end(&self) -> Cursor<'_> {
        Cursor::new(self, EntityKey::from_index(self.entities.len()))
    }

    /// Iterates over cursors at every live key, in key order.
    ///
    /// The iterator is double-ended: `iter().rev()` walks live keys from the
    /// last one down.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            front: self.begin(),
            back: self.entities.len(),
        }
    }

    /// Iterates over every `(key, &T)` pair in key order.
    ///
    /// Empty if `T` was never stored.
    #[must_use]
    pub fn values<T: Component>(&self) -> Values<'_, T> {
        Values {
            inner: self.columns.column::<T>().map(Column::iter),
        }
    }

    /// Iterates over every `(key, &mut T)` pair in key order.
    ///
    /// Never allocates a column.
    pub fn values_mut<T: Component>(&mut self) -> ValuesMut<'_, T> {
        ValuesMut {
            inner: self.columns.existing_column_mut::<T>().map(Column::iter_mut),
        }
    }

    /// Returns a cursor at the first key, in key order, whose `T` equals
    /// `target`.
    ///
    /// Returns a cursor at [`EntityKey::INVALID`] if nothing matches. The
    /// scan is linear.
    #[must_use]
    pub fn find<T: Component + PartialEq>(&self, target: &T) -> Cursor<'_> {
        let key = self
            .values::<T>()
            .find(|(_, value)| *value == target)
            .map_or(EntityKey::INVALID, |(key, _)| key);
        Cursor::new(self, key)
    }

    /// Returns the column for `T`, if one has been allocated.
    #[must_use]
    pub fn column<T: Component>(&self) -> Option<&Column<T>> {
        self.columns.column::<T>()
    }

    /// Returns every column.
    #[must_use]
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut ColumnSet {
        &mut self.columns
    }

    /// Returns entity presence.
    #[must_use]
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }
}

impl Clone for Repository {
    /// Copies presence verbatim and compacts every column.
    fn clone(&self) -> Self {
        debug!(
            "cloning repository: {} keys, {} columns",
            self.entities.len(),
            self.columns.column_count()
        );
        Self {
            entities: self.entities.clone(),
            columns: self.columns.clone(),
        }
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("len", &self.entities.len())
            .field("live", &self.entities.live_count())
            .field("columns", &self.columns)
            .finish()
    }
}

impl<'r> IntoIterator for &'r Repository {
    type Item = Cursor<'r>;
    type IntoIter = Iter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cursors at live keys.
#[derive(Clone, Debug)]
pub struct Iter<'r> {
    /// Next live key from the front, or the end position.
    front: Cursor<'r>,
    /// Keys at or past this index have been yielded from the back.
    back: usize,
}

impl<'r> Iterator for Iter<'r> {
    type Item = Cursor<'r>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front.key().index() >= self.back {
            return None;
        }
        let current = self.front;
        self.front.advance();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.back.saturating_sub(self.front.key().index())))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front.key().index() >= self.back {
            return None;
        }
        let repo = self.front.container()?;
        let key = repo.entities().prev_live(self.back)?;
        self.back = key.index();
        Some(Cursor::new(repo, key))
    }
}

impl FusedIterator for Iter<'_> {}

/// Iterator over one component type's values in key order.
///
/// Cloning yields an independent iterator from the same position, so a
/// scan can be restarted from a saved copy.
pub struct Values<'r, T> {
    inner: Option<column::Iter<'r, T>>,
}

impl<T> Clone for Values<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'r, T> Iterator for Values<'r, T> {
    type Item = (EntityKey, &'r T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl<T> DoubleEndedIterator for Values<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next_back()
    }
}

impl<T> FusedIterator for Values<'_, T> {}

/// Mutable iterator over one component type's values.
pub struct ValuesMut<'r, T> {
    inner: Option<column::IterMut<'r, T>>,
}

impl<'r, T> Iterator for ValuesMut<'r, T> {
    type Item = (EntityKey, &'r mut T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl<T> DoubleEndedIterator for ValuesMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next_back()
    }
}

impl<T> FusedIterator for ValuesMut<'_, T> {}
