//! A single reduce function bound to the action tags it handles.

use std::sync::Arc;

use crate::equality;
use crate::error::{ReducerFailure, StoreError};
use crate::mvi::{Action, Reducer, State};

pub(crate) type ReduceFn<S, A> =
    dyn Fn(&Arc<S>, &A) -> Result<Arc<S>, StoreError> + Send + Sync;

/// Binds a non-empty set of action tags to a transition over `S`.
///
/// The wrapped function only ever sees actions whose tag is in the set;
/// [`ReducerSet`](super::ReducerSet) routes by tag before calling it.
pub struct ReducerEntry<S, A: Action> {
    tags: Vec<A::Tag>,
    reduce: Arc<ReduceFn<S, A>>,
}

impl<S, A: Action> Clone for ReducerEntry<S, A> {
    fn clone(&self) -> Self {
        Self {
            tags: self.tags.clone(),
            reduce: Arc::clone(&self.reduce),
        }
    }
}

impl<S: State, A: Action> ReducerEntry<S, A> {
    /// Create an entry from a pure `(state, action) -> state` function.
    ///
    /// # Errors
    /// Returns `StoreError::EmptyTagSet` if `tags` yields nothing.
    pub fn new<T, F>(tags: T, reduce: F) -> Result<Self, StoreError>
    where
        T: IntoIterator<Item = A::Tag>,
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        Ok(Self::from_parts(unique_tags(tags)?, Arc::new(settled(reduce))))
    }

    /// Create an entry from a reducer that may reject the action.
    ///
    /// A rejection aborts the whole dispatch and leaves the store untouched.
    pub fn try_new<T, F>(tags: T, reduce: F) -> Result<Self, StoreError>
    where
        T: IntoIterator<Item = A::Tag>,
        F: Fn(&S, &A) -> Result<S, ReducerFailure> + Send + Sync + 'static,
    {
        Ok(Self::from_parts(
            unique_tags(tags)?,
            Arc::new(settled_fallible(reduce)),
        ))
    }

    /// Create an entry from a typed [`Reducer`] implementation.
    pub fn from_reducer<R, T>(tags: T) -> Result<Self, StoreError>
    where
        R: Reducer<State = S, Action = A> + 'static,
        T: IntoIterator<Item = A::Tag>,
    {
        Self::new(tags, R::reduce)
    }

    pub(crate) fn single<F>(tag: A::Tag, reduce: F) -> Self
    where
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        Self {
            tags: vec![tag],
            reduce: Arc::new(settled(reduce)),
        }
    }

    pub(crate) fn single_fallible<F>(tag: A::Tag, reduce: F) -> Self
    where
        F: Fn(&S, &A) -> Result<S, ReducerFailure> + Send + Sync + 'static,
    {
        Self {
            tags: vec![tag],
            reduce: Arc::new(settled_fallible(reduce)),
        }
    }

    /// Assemble an entry around an `Arc`-level reduce function.
    ///
    /// `tags` must be non-empty; callers pass tags taken from an existing
    /// entry or checked by `unique_tags`.
    pub(crate) fn from_parts(tags: Vec<A::Tag>, reduce: Arc<ReduceFn<S, A>>) -> Self {
        debug_assert!(!tags.is_empty());
        Self { tags, reduce }
    }

    /// Tags this entry is registered for, in declaration order.
    pub fn tags(&self) -> &[A::Tag] {
        &self.tags
    }

    pub fn handles(&self, tag: &A::Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Run the entry. Returns the input `Arc` itself when nothing changed.
    pub fn apply(&self, state: &Arc<S>, action: &A) -> Result<Arc<S>, StoreError> {
        debug_assert!(self.handles(&action.tag()));
        (self.reduce)(state, action)
    }
}

fn unique_tags<T: Eq>(tags: impl IntoIterator<Item = T>) -> Result<Vec<T>, StoreError> {
    let mut unique = Vec::new();
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    if unique.is_empty() {
        return Err(StoreError::EmptyTagSet);
    }
    Ok(unique)
}

fn settled<S, A, F>(
    reduce: F,
) -> impl Fn(&Arc<S>, &A) -> Result<Arc<S>, StoreError> + Send + Sync + 'static
where
    S: State,
    A: Action,
    F: Fn(&S, &A) -> S + Send + Sync + 'static,
{
    move |state: &Arc<S>, action: &A| -> Result<Arc<S>, StoreError> {
        let next = reduce(state.as_ref(), action);
        Ok(equality::settle(state, Arc::new(next)))
    }
}

fn settled_fallible<S, A, F>(
    reduce: F,
) -> impl Fn(&Arc<S>, &A) -> Result<Arc<S>, StoreError> + Send + Sync + 'static
where
    S: State,
    A: Action,
    F: Fn(&S, &A) -> Result<S, ReducerFailure> + Send + Sync + 'static,
{
    move |state: &Arc<S>, action: &A| -> Result<Arc<S>, StoreError> {
        let next = reduce(state.as_ref(), action).map_err(|source| StoreError::Reducer {
            tag: format!("{:?}", action.tag()),
            source,
        })?;
        Ok(equality::settle(state, Arc::new(next)))
    }
}
