//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: EntityKey, TypeRegistry, Error, and StoreConfig.

mod errors;
