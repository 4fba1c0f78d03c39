//! Heterogeneous collection of columns indexed by type.

use std::fmt;

use log::trace;
use stratum_foundation::{EntityKey, StoreConfig, TypeIndex, TypeRegistry};

use crate::column::Column;
use crate::component::Component;
use crate::erased::ErasedColumn;

/// One column per component type, located through a [`TypeRegistry`].
///
/// Slot `i` holds the column of the type registered at index `i`, or nothing
/// if that type has not stored a value yet. Columns are allocated lazily by
/// the mutable accessor; read-only accessors never allocate.
#[derive(Default)]
pub struct ColumnSet {
    registry: TypeRegistry,
    columns: Vec<Option<Box<dyn ErasedColumn>>>,
    config: StoreConfig,
}

impl ColumnSet {
    /// Creates an empty column set with default block sizes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty column set whose columns use `config`.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the registry mapping types to column slots.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Returns the block growth parameters for new columns.
    #[must_use]
    pub fn config(&self) -> StoreConfig {
        self.config
    }

    fn erased(&self, index: TypeIndex) -> Option<&dyn ErasedColumn> {
        self.columns.get(index.index())?.as_deref()
    }

    /// Returns the column for `T`, if one has been allocated.
    #[must_use]
    pub fn column<T: Component>(&self) -> Option<&Column<T>> {
        let index = self.registry.index_of::<T>()?;
        self.erased(index)?.as_any().downcast_ref::<Column<T>>()
    }

    /// Returns the column for `T` mutably, if one has been allocated.
    pub fn existing_column_mut<T: Component>(&mut self) -> Option<&mut Column<T>> {
        let index = self.registry.index_of::<T>()?;
        self.columns
            .get_mut(index.index())?
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut::<Column<T>>()
    }

    /// Returns the column for `T`, allocating an empty one on first use.
    ///
    /// # Panics
    ///
    /// Panics if the slot registered for `T` holds a column of another type.
    /// Slots are only ever filled through this method with the type they
    /// were registered for, so this does not happen.
    pub fn column_mut<T: Component>(&mut self) -> &mut Column<T> {
        let index = self.registry.register::<T>().index();
        if index >= self.columns.len() {
            self.columns.resize_with(index + 1, || None);
        }

        let config = self.config;
        let slot = &mut self.columns[index];
        if slot.is_none() {
            trace!(
                "allocating column for {} at slot {index}",
                std::any::type_name::<T>()
            );
            *slot = Some(Box::new(Column::<T>::with_config(config)));
        }

        slot.as_deref_mut()
            .and_then(|column| column.as_any_mut().downcast_mut::<Column<T>>())
            .expect("column slot holds the type registered for it")
    }

    /// Erases `key` from every allocated column.
    ///
    /// Returns the number of values removed.
    pub fn erase_key(&mut self, key: EntityKey) -> usize {
        self.columns
            .iter_mut()
            .flatten()
            .map(|column| usize::from(column.erase_key(key)))
            .sum()
    }

    /// Returns true if any allocated column has a value for `key`.
    #[must_use]
    pub fn any_contains(&self, key: EntityKey) -> bool {
        self.columns
            .iter()
            .flatten()
            .any(|column| column.contains_key(key))
    }

    /// Returns the number of allocated columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.iter().flatten().count()
    }

    /// Iterates over allocated columns with their type indices.
    pub fn iter(&self) -> impl Iterator<Item = (TypeIndex, &dyn ErasedColumn)> + '_ {
        self.registry
            .iter()
            .filter_map(|(index, _)| self.erased(index).map(|column| (index, column)))
    }
}

impl Clone for ColumnSet {
    /// Deep-copies every allocated column, keeping each type at its index.
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            columns: self
                .columns
                .iter()
                .map(|column| column.as_ref().map(|column| column.clone_boxed()))
                .collect(),
            config: self.config,
        }
    }
}

impl fmt::Debug for ColumnSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|(index, column)| ((index, column.type_name()), column.len())),
            )
            .finish()
    }
}
