//! Core types for Stratum.
//!
//! This crate provides:
//! - [`EntityKey`] - Dense, never-reused entity keys
//! - [`TypeRegistry`] - Stable small-integer indices for component types
//! - [`Error`] - Rich error types for the checked accessors
//! - [`StoreConfig`] - Block growth parameters for column storage

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod entity;
pub mod error;
pub mod registry;

pub use config::{DEFAULT_BLOCK_CAPACITY, StoreConfig};
pub use entity::EntityKey;
pub use error::{Error, ErrorContext, ErrorKind};
pub use registry::{TypeIndex, TypeRegistry};

/// Result type alias using Stratum's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
