//! Integration tests for column storage
//!
//! Tests block growth, address stability, tombstoning, and compaction.

use stratum_foundation::{EntityKey, StoreConfig};
use stratum_storage::{Column, ColumnSet, ErasedColumn};

fn key(raw: u32) -> EntityKey {
    EntityKey::new(raw)
}

// =============================================================================
// Block Growth
// =============================================================================

#[test]
fn blocks_grow_by_doubling() {
    let mut column = Column::new();
    for raw in 0..8 {
        column.emplace(key(raw), raw);
    }
    assert_eq!(column.block_count(), 1);
    assert_eq!(column.capacity(), 8);

    column.emplace(key(8), 8);
    assert_eq!(column.block_count(), 2);
    assert_eq!(column.capacity(), 8 + 16);

    for raw in 9..25 {
        column.emplace(key(raw), raw);
    }
    assert_eq!(column.block_count(), 3);
    assert_eq!(column.capacity(), 8 + 16 + 32);
}

#[test]
fn overwrite_does_not_consume_slots() {
    let mut column = Column::new();
    for round in 0..100u32 {
        column.emplace(key(0), round);
    }
    assert_eq!(column.len(), 1);
    assert_eq!(column.block_count(), 1);
    assert_eq!(column.view(key(0)), Some(&99));
}

#[test]
fn sparse_keys_only_extend_index() {
    let mut column = Column::new();
    column.emplace(key(1000), 'z');

    assert_eq!(column.len(), 1);
    assert_eq!(column.sparse_len(), 1001);
    assert!(!column.contains(key(999)));
    assert!(column.view(key(5000)).is_none());
}

// =============================================================================
// Address Stability
// =============================================================================

#[test]
fn address_survives_block_crossings() {
    let mut column = Column::with_config(StoreConfig::compact());
    let first: *const String = column.emplace(key(0), String::from("zero"));

    for raw in 1..64 {
        column.emplace(key(raw), raw.to_string());
    }

    assert!(column.block_count() > 3);
    assert!(std::ptr::eq(first, column.view(key(0)).unwrap()));
}

#[test]
fn overwrite_keeps_address() {
    let mut column = Column::new();
    let before: *const u64 = column.emplace(key(3), 1);
    let after: *const u64 = column.emplace(key(3), 2);
    assert!(std::ptr::eq(before, after));
}

// =============================================================================
// Erase
// =============================================================================

#[test]
fn erase_returns_value_and_tombstones() {
    let mut column = Column::new();
    column.emplace(key(0), String::from("a"));
    column.emplace(key(1), String::from("b"));

    assert_eq!(column.erase(key(0)).as_deref(), Some("a"));
    assert!(!column.contains(key(0)));
    assert!(column.contains(key(1)));
    assert_eq!(column.len(), 1);
    assert!(column.erase(key(0)).is_none());
}

#[test]
fn re_emplace_after_erase_takes_new_slot() {
    let mut column = Column::new();
    let old: *const i32 = column.emplace(key(0), 1);
    column.erase(key(0));
    let new: *const i32 = column.emplace(key(0), 2);

    assert!(!std::ptr::eq(old, new));
    assert_eq!(column.view(key(0)), Some(&2));
}

// =============================================================================
// Clone
// =============================================================================

#[test]
fn clone_compacts_to_live_values() {
    let mut column = Column::new();
    for raw in 0..20 {
        column.emplace(key(raw), raw);
    }
    for raw in (0..20).step_by(2) {
        column.erase(key(raw));
    }

    let copy = column.clone();
    assert_eq!(copy.len(), 10);
    assert_eq!(copy.block_count(), 1);
    assert_eq!(copy.capacity(), 10);
    assert_eq!(
        copy.iter().map(|(k, v)| (k.raw(), *v)).collect::<Vec<_>>(),
        column.iter().map(|(k, v)| (k.raw(), *v)).collect::<Vec<_>>()
    );
    assert!(!std::ptr::eq(
        copy.view(key(1)).unwrap(),
        column.view(key(1)).unwrap()
    ));
}

#[test]
fn clone_of_empty_column_is_empty() {
    let column: Column<u8> = Column::new();
    let copy = column.clone();
    assert!(copy.is_empty());
    assert!(copy.iter().next().is_none());
}

// =============================================================================
// Column Set
// =============================================================================

#[test]
fn column_set_clone_is_independent() {
    let mut columns = ColumnSet::new();
    columns.column_mut::<String>().emplace(key(0), "left".into());

    let mut copy = columns.clone();
    copy.column_mut::<String>().emplace(key(0), "right".into());

    assert_eq!(
        columns.column::<String>().unwrap().view(key(0)).map(String::as_str),
        Some("left")
    );
}

#[test]
fn erased_columns_are_listed_by_index() {
    let mut columns = ColumnSet::new();
    columns.column_mut::<u8>().emplace(key(0), 1);
    columns.column_mut::<u16>().emplace(key(0), 2);

    let names: Vec<_> = columns
        .iter()
        .map(|(index, column)| (index.index(), column.type_name()))
        .collect();
    assert_eq!(names, vec![(0, "u8"), (1, "u16")]);

    let total: usize = columns.iter().map(|(_, column)| ErasedColumn::len(column)).sum();
    assert_eq!(total, 2);
}
