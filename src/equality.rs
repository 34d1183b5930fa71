//! Equality oracle and copy primitive for `Arc`-shared state.
//!
//! Deep equality is the derived `PartialEq` of each state type. Identity
//! (`Arc::ptr_eq`) is checked first since an unchanged sub-tree is always
//! the very same allocation.

use std::sync::Arc;

/// Returns true when `a` and `b` are the same allocation or deep-equal.
pub fn same<T: PartialEq + ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    Arc::ptr_eq(a, b) || **a == **b
}

/// Keeps `previous` when `candidate` is equal to it.
///
/// This is what lets a no-op transition hand back the original handle
/// instead of a structurally equal copy.
pub fn settle<T: PartialEq + ?Sized>(previous: &Arc<T>, candidate: Arc<T>) -> Arc<T> {
    if same(previous, &candidate) {
        Arc::clone(previous)
    } else {
        candidate
    }
}

/// Shallow-copies `value` and applies `edit` to the copy.
///
/// Sub-trees held in `Arc` fields are shared with the original, which stays
/// valid and unchanged.
pub fn copy_with<T, E>(value: &T, edit: E) -> T
where
    T: Clone,
    E: FnOnce(&mut T),
{
    let mut copy = value.clone();
    edit(&mut copy);
    copy
}
