//! Entity cursors.
//!
//! A cursor locates one entity key inside a repository and exposes typed
//! component access for it. [`Cursor`] borrows the repository shared and is
//! `Copy`; [`CursorMut`] borrows it exclusively and can write components.
//! Neither owns data, and the borrow checker keeps both from outliving the
//! repository.
//!
//! A cursor is in one of three states:
//! - unbound: no repository (the [`Default`] cursor),
//! - bound but invalid: the key was never issued or has been erased,
//! - bound and valid.
//!
//! Erasing a component never changes a cursor's entity-level validity; only
//! [`Repository::erase`] and [`Repository::resize`] do.

use std::fmt;
use std::ptr;

use stratum_foundation::{EntityKey, Error, ErrorContext, Result};

use crate::component::{Bundle, Component, ComponentSet};
use crate::repository::Repository;

/// Shared locator of one entity in a [`Repository`].
#[derive(Clone, Copy, Default)]
pub struct Cursor<'r> {
    repo: Option<&'r Repository>,
    key: EntityKey,
}

impl<'r> Cursor<'r> {
    /// Creates a cursor bound to `repo` at `key`, without checking the key.
    #[must_use]
    pub fn new(repo: &'r Repository, key: EntityKey) -> Self {
        Self {
            repo: Some(repo),
            key,
        }
    }

    /// Creates a cursor bound to no repository.
    #[must_use]
    pub const fn unbound() -> Self {
        Self {
            repo: None,
            key: EntityKey::INVALID,
        }
    }

    /// Returns the entity key.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        self.key
    }

    /// Returns the repository this cursor points into.
    #[must_use]
    pub fn container(&self) -> Option<&'r Repository> {
        self.repo
    }

    /// Returns true if bound to a repository that contains the key.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.repo.is_some_and(|repo| repo.contains(self.key))
    }

    /// Returns true if the entity has a value of type `T`.
    #[must_use]
    pub fn contains<T: Component>(&self) -> bool {
        self.view::<T>().is_some()
    }

    /// Returns true if the entity has a value of every type in `S`.
    #[must_use]
    pub fn contains_all<S: ComponentSet>(&self) -> bool {
        self.repo
            .is_some_and(|repo| S::contained_in(repo.columns(), self.key))
    }

    /// Returns the entity's value of type `T`.
    #[must_use]
    pub fn view<T: Component>(&self) -> Option<&'r T> {
        self.repo?.columns().column::<T>()?.view(self.key)
    }

    /// Returns the entity's value of type `T`, explaining its absence.
    ///
    /// # Errors
    ///
    /// Returns `UnboundCursor`, `EntityNotFound` or `EntityErased` for a bad
    /// key, `UnknownType` if `T` was never stored, or `ComponentNotFound`.
    pub fn get<T: Component>(&self) -> Result<&'r T> {
        let repo = self.repo.ok_or_else(|| {
            Error::unbound_cursor().with_context(ErrorContext::new().with_operation("Cursor::get"))
        })?;
        component_of::<T>(repo, self.key)
    }

    /// Moves to the previous valid key.
    ///
    /// Returns false and stays put if no valid key precedes this one, if the
    /// key is [`EntityKey::INVALID`], or if the cursor is unbound. From the
    /// end position this lands on the last valid key.
    pub fn retreat(&mut self) -> bool {
        let previous = self
            .repo
            .filter(|_| !self.key.is_invalid())
            .and_then(|repo| repo.entities().prev_live(self.key.index()));
        if let Some(key) = previous {
            self.key = key;
        }
        previous.is_some()
    }

    /// Moves to the next valid key, or to the end position.
    ///
    /// The end position is the key equal to the repository's length.
    /// Advancing from [`EntityKey::INVALID`] lands on the first valid key.
    /// Unbound cursors do not move.
    pub fn advance(&mut self) {
        if let Some(repo) = self.repo {
            self.key = repo.entities().next_live(self.key);
        }
    }
}

fn component_of<T: Component>(repo: &Repository, key: EntityKey) -> Result<&T> {
    repo.validate(key)?;
    let name = std::any::type_name::<T>();
    let column = repo
        .columns()
        .column::<T>()
        .ok_or_else(|| Error::unknown_type(name))?;
    column
        .view(key)
        .ok_or_else(|| Error::component_not_found(key, name))
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        let same_repo = match (self.repo, other.repo) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_repo && self.key == other.key
    }
}

impl Eq for Cursor<'_> {}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("bound", &self.repo.is_some())
            .field("key", &self.key)
            .finish()
    }
}

/// Exclusive locator of one entity in a [`Repository`], able to write
/// components.
pub struct CursorMut<'r> {
    repo: &'r mut Repository,
    key: EntityKey,
}

impl<'r> CursorMut<'r> {
    /// Creates a cursor bound to `repo` at `key`, without checking the key.
    pub fn new(repo: &'r mut Repository, key: EntityKey) -> Self {
        Self { repo, key }
    }

    /// Returns the entity key.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        self.key
    }

    /// Returns true if the repository contains the key.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.repo.contains(self.key)
    }

    /// Returns a shared cursor at the same key.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_> {
        Cursor::new(self.repo, self.key)
    }

    /// Converts into a shared cursor for the rest of the borrow.
    #[must_use]
    pub fn into_cursor(self) -> Cursor<'r> {
        Cursor::new(self.repo, self.key)
    }

    /// Returns true if the entity has a value of type `T`.
    #[must_use]
    pub fn contains<T: Component>(&self) -> bool {
        self.view::<T>().is_some()
    }

    /// Returns true if the entity has a value of every type in `S`.
    #[must_use]
    pub fn contains_all<S: ComponentSet>(&self) -> bool {
        S::contained_in(self.repo.columns(), self.key)
    }

    /// Returns the entity's value of type `T`.
    #[must_use]
    pub fn view<T: Component>(&self) -> Option<&T> {
        self.repo.columns().column::<T>()?.view(self.key)
    }

    /// Returns the entity's value of type `T` mutably.
    ///
    /// Never allocates a column.
    pub fn view_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.repo
            .columns_mut()
            .existing_column_mut::<T>()?
            .view_mut(self.key)
    }

    /// Returns the entity's value of type `T`, explaining its absence.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` or `EntityErased` for a bad key,
    /// `UnknownType` if `T` was never stored, or `ComponentNotFound`.
    pub fn get<T: Component>(&self) -> Result<&T> {
        component_of::<T>(self.repo, self.key)
    }

    /// Stores `value` as the entity's `T`, returning a reference to it.
    ///
    /// An existing value is assigned over in place and keeps its address.
    pub fn emplace<T: Component>(&mut self, value: T) -> &mut T {
        self.repo.columns_mut().column_mut::<T>().emplace(self.key, value)
    }

    /// Stores every value of `bundle`, in tuple order.
    pub fn emplace_bundle<B: Bundle>(&mut self, bundle: B) -> &mut Self {
        bundle.emplace_into(self.repo.columns_mut(), self.key);
        self
    }

    /// Removes the entity's value of type `T`, returning it.
    ///
    /// A type with no column is a no-op.
    pub fn erase<T: Component>(&mut self) -> Option<T> {
        self.repo
            .columns_mut()
            .existing_column_mut::<T>()?
            .erase(self.key)
    }

    /// Removes the entity's value of every type in `S`.
    pub fn erase_all<S: ComponentSet>(&mut self) -> &mut Self {
        S::erase_from(self.repo.columns_mut(), self.key);
        self
    }

    /// Copies every type in `S` that `source` holds onto this entity.
    ///
    /// `source` points into another repository. Types it lacks keep their
    /// current value here; an unbound source copies nothing.
    pub fn merge<S: ComponentSet>(&mut self, source: &Cursor<'_>) -> &mut Self {
        if let Some(repo) = source.container() {
            S::copy_between(repo.columns(), source.key(), self.repo.columns_mut(), self.key);
        }
        self
    }

    /// Copies every type in `S` that entity `source` of this repository
    /// holds onto this entity.
    ///
    /// Types `source` lacks keep their current value here.
    pub fn merge_from<S: ComponentSet>(&mut self, source: EntityKey) -> &mut Self {
        S::copy_within(self.repo.columns_mut(), source, self.key);
        self
    }
}

impl fmt::Debug for CursorMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("key", &self.key).finish()
    }
}
