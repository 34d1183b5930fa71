//! Base trait for state values.

/// Marker trait for root and feature state.
///
/// States should be:
/// - Immutable (replaced, never mutated in place once published)
/// - Cheap to clone (feature sub-trees live behind `Arc`)
/// - Comparable (derived `PartialEq` is the deep equality check)
/// - Defaultable (`Store::reset` starts over from `Default`)
pub trait State: Clone + PartialEq + Default + Send + Sync + 'static {}
