#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

/// The set type used for selected row identifiers.
#[cfg(feature = "std")]
pub type SelectionSet<ID> = HashSet<ID>;
#[cfg(not(feature = "std"))]
pub type SelectionSet<ID> = BTreeSet<ID>;

/// Bounds required of row identifiers.
#[cfg(feature = "std")]
pub trait RowId: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq + Clone> RowId for T {}

#[cfg(not(feature = "std"))]
pub trait RowId: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<T: Ord + Clone> RowId for T {}
