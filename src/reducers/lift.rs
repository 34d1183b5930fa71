//! Lifting feature-shaped reducer sets into their parent shape.

use std::any::type_name;
use std::sync::Arc;

use crate::equality;
use crate::error::StoreError;
use crate::mvi::{Action, State};

use super::entry::{ReduceFn, ReducerEntry};
use super::lens::FeatureLens;
use super::set::ReducerSet;

/// Parent states whose feature fields can be searched by reference.
///
/// Implemented by hand for parents lifted with [`lift_with`]. List every
/// field that can hold an `F`, required or optional, in a fixed order.
pub trait FeatureFields<F> {
    /// Every field able to hold an `F`; `None` for an absent optional one.
    fn feature_fields(&self) -> Vec<Option<&Arc<F>>>;

    /// Copy of `self` with the field at `index` (as listed by
    /// `feature_fields`) replaced by `feature`.
    fn with_feature(&self, index: usize, feature: Arc<F>) -> Self;
}

/// Lift a reducer set over `F` into one over the parent `P`.
///
/// Each lifted entry reads the feature through `lens`, leaves the parent
/// untouched (same `Arc`) when the feature is absent or the feature reducer
/// made no change, and otherwise rebuilds the parent through the lens with
/// every other field shared. The result is an ordinary set and can be
/// lifted again.
pub fn lift<P, F, A, L>(features: ReducerSet<F, A>, lens: L) -> ReducerSet<P, A>
where
    P: State,
    F: State,
    A: Action,
    L: FeatureLens<P, F>,
{
    let lens = Arc::new(lens);
    lift_entries(features, |entry| {
        let lens = Arc::clone(&lens);
        let reduce: Arc<ReduceFn<P, A>> = Arc::new(
            move |state: &Arc<P>, action: &A| -> Result<Arc<P>, StoreError> {
                let Some(feature) = lens.get(state.as_ref()) else {
                    return Ok(Arc::clone(state));
                };
                let next = entry.apply(feature, action)?;
                if equality::same(feature, &next) {
                    return Ok(Arc::clone(state));
                }
                Ok(Arc::new(lens.set(state.as_ref(), next)))
            },
        );
        reduce
    })
}

/// Lift a reducer set using a plain extraction function.
///
/// The parent field to replace is found by searching `P`'s feature fields
/// for the one holding the extracted `Arc` by identity. `select` must hand
/// back the field's own `Arc`, not a rebuilt or cached copy.
///
/// # Errors
/// Reduction fails with `StoreError::FeatureNotFound` when no field holds
/// the extracted feature and with `StoreError::AmbiguousFeature` when more
/// than one does. Both are wiring mistakes and are logged at error level.
pub fn lift_with<P, F, A, Sel>(features: ReducerSet<F, A>, select: Sel) -> ReducerSet<P, A>
where
    P: State + FeatureFields<F>,
    F: State,
    A: Action,
    Sel: Fn(&P) -> Option<Arc<F>> + Send + Sync + 'static,
{
    let select = Arc::new(select);
    lift_entries(features, |entry| {
        let select = Arc::clone(&select);
        let reduce: Arc<ReduceFn<P, A>> = Arc::new(
            move |state: &Arc<P>, action: &A| -> Result<Arc<P>, StoreError> {
                let Some(feature) = select(state.as_ref()) else {
                    return Ok(Arc::clone(state));
                };
                let next = entry.apply(&feature, action)?;
                if equality::same(&feature, &next) {
                    return Ok(Arc::clone(state));
                }

                let holders: Vec<usize> = state
                    .feature_fields()
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, field)| match field {
                        Some(field) if Arc::ptr_eq(field, &feature) => Some(index),
                        _ => None,
                    })
                    .collect();

                match holders.as_slice() {
                    [index] => Ok(Arc::new(state.with_feature(*index, next))),
                    [] => {
                        tracing::error!(
                            feature = type_name::<F>(),
                            parent = type_name::<P>(),
                            tag = ?action.tag(),
                            "Selected feature is not a field of the parent state"
                        );
                        Err(StoreError::FeatureNotFound {
                            feature: type_name::<F>(),
                            parent: type_name::<P>(),
                        })
                    }
                    _ => {
                        tracing::error!(
                            feature = type_name::<F>(),
                            parent = type_name::<P>(),
                            fields = holders.len(),
                            "Selected feature is shared by several parent fields"
                        );
                        Err(StoreError::AmbiguousFeature {
                            feature: type_name::<F>(),
                            parent: type_name::<P>(),
                        })
                    }
                }
            },
        );
        reduce
    })
}

fn lift_entries<P, F, A, W>(features: ReducerSet<F, A>, mut wrap: W) -> ReducerSet<P, A>
where
    P: State,
    F: State,
    A: Action,
    W: FnMut(ReducerEntry<F, A>) -> Arc<ReduceFn<P, A>>,
{
    let mut lifted = ReducerSet::new();
    for entry in features.into_entries() {
        let tags = entry.tags().to_vec();
        let reduce = wrap(entry);
        lifted.push(ReducerEntry::from_parts(tags, reduce));
    }
    lifted
}
