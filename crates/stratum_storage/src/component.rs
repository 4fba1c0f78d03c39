//! Component types and multi-component operations.
//!
//! Any `Clone + 'static` type can be stored as a component. Tuples of
//! components implement [`Bundle`] (assign several values at once) and
//! [`ComponentSet`] (check or erase several types at once).

use stratum_foundation::EntityKey;

use crate::column_set::ColumnSet;

/// Marker trait for values storable in a repository.
///
/// `Clone` backs the repository's deep copy; `'static` backs type
/// registration. Implemented for every qualifying type.
pub trait Component: Clone + 'static {}

impl<T: Clone + 'static> Component for T {}

/// A group of component values assigned to one entity together.
///
/// Implemented for tuples of up to eight components. Values are written in
/// tuple order; distinct types land in disjoint columns, so order is only
/// observable when a type repeats (the last value wins).
pub trait Bundle {
    /// Writes every value of the bundle for `key`.
    fn emplace_into(self, columns: &mut ColumnSet, key: EntityKey);
}

/// A group of component types queried, erased, or copied together.
///
/// Implemented for tuples of up to eight components.
pub trait ComponentSet {
    /// Returns true if `key` has a value of every type in the set.
    ///
    /// Stops at the first missing type.
    fn contained_in(columns: &ColumnSet, key: EntityKey) -> bool;

    /// Erases the value of every type in the set for `key`.
    ///
    /// Types with no column are skipped.
    fn erase_from(columns: &mut ColumnSet, key: EntityKey);

    /// Copies each type's value for `from` in `source` onto `to` in `target`.
    ///
    /// Types `from` lacks are left untouched on `to`.
    fn copy_between(source: &ColumnSet, from: EntityKey, target: &mut ColumnSet, to: EntityKey);

    /// Copies each type's value from `from` onto `to` within one column set.
    ///
    /// Types `from` lacks are left untouched on `to`.
    fn copy_within(columns: &mut ColumnSet, from: EntityKey, to: EntityKey);
}

impl Bundle for () {
    fn emplace_into(self, _columns: &mut ColumnSet, _key: EntityKey) {}
}

macro_rules! tuple_impls {
    ($($name:ident),+) => {
        impl<$($name: Component),+> Bundle for ($($name,)+) {
            #[allow(non_snake_case)]
            fn emplace_into(self, columns: &mut ColumnSet, key: EntityKey) {
                let ($($name,)+) = self;
                $(columns.column_mut::<$name>().emplace(key, $name);)+
            }
        }

        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            fn contained_in(columns: &ColumnSet, key: EntityKey) -> bool {
                $(columns.column::<$name>().is_some_and(|column| column.contains(key)))&&+
            }

            fn erase_from(columns: &mut ColumnSet, key: EntityKey) {
                $(
                    if let Some(column) = columns.existing_column_mut::<$name>() {
                        column.erase(key);
                    }
                )+
            }

            fn copy_between(
                source: &ColumnSet,
                from: EntityKey,
                target: &mut ColumnSet,
                to: EntityKey,
            ) {
                $(
                    if let Some(value) = source.column::<$name>().and_then(|c| c.view(from)) {
                        target.column_mut::<$name>().emplace(to, value.clone());
                    }
                )+
            }

            fn copy_within(columns: &mut ColumnSet, from: EntityKey, to: EntityKey) {
                $(
                    if let Some(value) = columns.column::<$name>().and_then(|c| c.view(from)).cloned() {
                        columns.column_mut::<$name>().emplace(to, value);
                    }
                )+
            }
        }
    };
}

tuple_impls!(A);
tuple_impls!(A, B);
tuple_impls!(A, B, C);
tuple_impls!(A, B, C, D);
tuple_impls!(A, B, C, D, E);
tuple_impls!(A, B, C, D, E, F);
tuple_impls!(A, B, C, D, E, F, G);
tuple_impls!(A, B, C, D, E, F, G, H);
