//! Type-erased access to columns.

use std::any::{Any, type_name};

use stratum_foundation::EntityKey;

use crate::column::Column;
use crate::component::Component;

/// Operations on a [`Column<T>`] that do not need to know `T`.
///
/// Repository-wide operations (erasing an entity, cloning) fan out across
/// every column through this trait; typed access goes through
/// [`ErasedColumn::as_any`] and a downcast.
pub trait ErasedColumn {
    /// Removes the value stored for `key`, if any. Returns true if one was removed.
    fn erase_key(&mut self, key: EntityKey) -> bool;

    /// Returns true if `key` has a value in this column.
    fn contains_key(&self, key: EntityKey) -> bool;

    /// Deep-copies this column, compacting its storage.
    fn clone_boxed(&self) -> Box<dyn ErasedColumn>;

    /// Returns the number of stored values.
    fn len(&self) -> usize;

    /// Returns true if no values are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the name of the stored value type.
    fn type_name(&self) -> &'static str;

    /// Casts to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Casts to `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedColumn for Column<T> {
    fn erase_key(&mut self, key: EntityKey) -> bool {
        self.erase(key).is_some()
    }

    fn contains_key(&self, key: EntityKey) -> bool {
        self.contains(key)
    }

    fn clone_boxed(&self) -> Box<dyn ErasedColumn> {
        Box::new(self.clone())
    }

    fn len(&self) -> usize {
        Column::len(self)
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
