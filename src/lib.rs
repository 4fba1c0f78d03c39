//! Stratum - Typed component repository
//!
//! This crate re-exports all layers of the Stratum system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: stratum_storage    - Columns, repository, cursors
//! Layer 0: stratum_foundation - Core types (EntityKey, TypeRegistry, Error)
//! ```
//!
//! # Example
//!
//! ```
//! use stratum::storage::Repository;
//!
//! let mut repo = Repository::new();
//! let key = repo.create_with((42i32, String::from("answer"))).key();
//!
//! let found = repo.find(&String::from("answer"));
//! assert_eq!(found.key(), key);
//! assert_eq!(found.view::<i32>(), Some(&42));
//! ```

pub use stratum_foundation as foundation;
pub use stratum_storage as storage;
