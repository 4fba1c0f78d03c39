//! Component storage for Stratum.
//!
//! This crate provides:
//! - [`Column`] - Per-type block storage with stable value addresses
//! - [`ColumnSet`] - Type-erased columns indexed by [`TypeRegistry`]
//! - [`EntityStore`] - Sequential keys with tombstoned presence flags
//! - [`Repository`] - Entity-level create, erase, resize, iterate, and find
//! - [`Cursor`] / [`CursorMut`] - Typed component access for one entity
//!
//! [`TypeRegistry`]: stratum_foundation::TypeRegistry

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod block;

pub mod column;
pub mod column_set;
pub mod component;
pub mod cursor;
pub mod entity;
pub mod erased;
pub mod repository;

pub use column::Column;
pub use column_set::ColumnSet;
pub use component::{Bundle, Component, ComponentSet};
pub use cursor::{Cursor, CursorMut};
pub use entity::EntityStore;
pub use erased::ErasedColumn;
pub use repository::{Repository, Values, ValuesMut};
