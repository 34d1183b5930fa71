//! Pure projections from state to derived values.
//!
//! Selectors are what subscriptions compare: a subscriber is only notified
//! when its selector's output changes. [`memoize`] and [`create_selector`]
//! keep the previous output and hand it back (same `Arc`, when the output is
//! one) as long as their inputs are unchanged.

mod memo;

use std::marker::PhantomData;
use std::sync::Arc;

pub use memo::{create_selector, memoize, Combined, Memoized, SelectorInputs};

/// A pure projection of `S`.
pub trait Selector<S>: Send + Sync + 'static {
    /// Derived value. `PartialEq` decides whether observers are notified.
    type Output: Clone + PartialEq + Send + Sync + 'static;

    fn select(&self, state: &Arc<S>) -> Self::Output;
}

impl<S, T> Selector<S> for Arc<T>
where
    T: Selector<S> + ?Sized,
{
    type Output = T::Output;

    fn select(&self, state: &Arc<S>) -> Self::Output {
        (**self).select(state)
    }
}

/// Unmemoized selector wrapping a plain function.
pub struct FnSelector<S, O, F> {
    project: F,
    _marker: PhantomData<fn(&S) -> O>,
}

/// Wrap `project` as a selector. It runs on every evaluation.
pub fn from_fn<S, O, F>(project: F) -> FnSelector<S, O, F>
where
    S: Send + Sync + 'static,
    O: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(&S) -> O + Send + Sync + 'static,
{
    FnSelector {
        project,
        _marker: PhantomData,
    }
}

impl<S, O, F> Selector<S> for FnSelector<S, O, F>
where
    S: Send + Sync + 'static,
    O: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(&S) -> O + Send + Sync + 'static,
{
    type Output = O;

    fn select(&self, state: &Arc<S>) -> O {
        (self.project)(state.as_ref())
    }
}

/// Selects the whole state handle.
pub struct WholeState<S> {
    _marker: PhantomData<fn() -> S>,
}

impl<S> WholeState<S> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S> Default for WholeState<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Selector<S> for WholeState<S>
where
    S: PartialEq + Send + Sync + 'static,
{
    type Output = Arc<S>;

    fn select(&self, state: &Arc<S>) -> Arc<S> {
        Arc::clone(state)
    }
}
