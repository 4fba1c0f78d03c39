//! Type registration for component columns.
//!
//! Every distinct component type is assigned a small, stable index on first
//! use, so column lookup is a vector index instead of a type comparison.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::trace;

/// Registered type index.
///
/// Indices are handed out densely from 0 in registration order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TypeIndex(pub(crate) u32);

impl TypeIndex {
    /// Returns the index as a position in per-type storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw value of this index.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TypeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeIndex({})", self.0)
    }
}

/// Assigns each distinct type a stable index.
///
/// Rust types are keyed by [`TypeId`]; the [`type_name`] of each is kept for
/// diagnostics and for name lookups. Plain names can also be registered on
/// their own and share the same index space.
///
/// Indices are never removed. The registry is an ordinary value: each
/// repository owns one, so independent repositories (and tests) never share
/// registration state. It is not thread-safe.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    /// Name of each index, in registration order.
    names: Vec<Arc<str>>,
    /// Map from name to index.
    name_to_index: HashMap<Arc<str>, TypeIndex>,
    /// Map from Rust type to index.
    type_to_index: HashMap<TypeId, TypeIndex>,
    /// Rust type bound to each index, if any.
    typed: Vec<Option<TypeId>>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self, name: Arc<str>) -> TypeIndex {
        let index = TypeIndex(u32::try_from(self.names.len()).expect("too many registered types"));
        self.names.push(Arc::clone(&name));
        self.typed.push(None);
        trace!("registered type {name} as {index:?}");
        self.name_to_index.entry(name).or_insert(index);
        index
    }

    /// Returns the index of `T`, registering it on first use.
    ///
    /// If the type's name was registered earlier through
    /// [`TypeRegistry::register_name`], `T` takes over that index, unless
    /// another Rust type with the same name already holds it.
    pub fn register<T: 'static>(&mut self) -> TypeIndex {
        let id = TypeId::of::<T>();
        if let Some(&index) = self.type_to_index.get(&id) {
            return index;
        }

        let name = type_name::<T>();
        let index = match self.name_to_index.get(name).copied() {
            Some(named) if self.typed[named.index()].is_none() => named,
            _ => self.allocate(Arc::from(name)),
        };
        self.typed[index.index()] = Some(id);
        self.type_to_index.insert(id, index);
        index
    }

    /// Returns the index registered under `name`, registering it on first use.
    ///
    /// A name already claimed by a Rust type resolves to that type's index.
    pub fn register_name(&mut self, name: &str) -> TypeIndex {
        if let Some(&index) = self.name_to_index.get(name) {
            return index;
        }
        self.allocate(Arc::from(name))
    }

    /// Returns the index of `T` without registering it.
    #[must_use]
    pub fn index_of<T: 'static>(&self) -> Option<TypeIndex> {
        self.type_to_index.get(&TypeId::of::<T>()).copied()
    }

    /// Returns the index registered under `name` without registering it.
    #[must_use]
    pub fn index_of_name(&self, name: &str) -> Option<TypeIndex> {
        self.name_to_index.get(name).copied()
    }

    /// Returns the name registered at `index`.
    #[must_use]
    pub fn name_of(&self, index: TypeIndex) -> Option<&str> {
        self.names.get(index.index()).map(AsRef::as_ref)
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over `(index, name)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeIndex, &str)> + '_ {
        self.names
            .iter()
            .zip(0u32..)
            .map(|(name, raw)| (TypeIndex(raw), name.as_ref()))
    }
}
