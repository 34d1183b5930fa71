//! Reducer trait for MVI architecture.

use super::action::Action;
use super::state::State;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> State. Returning a value
/// equal to the input means "no change"; the reducer set then keeps the
/// original `Arc` so nothing upstream is copied.
///
/// Register one with [`ReducerEntry::from_reducer`](crate::reducers::ReducerEntry::from_reducer).
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: State;

    /// The action type this reducer handles.
    type Action: Action;

    /// Process an action and return the new state.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: &Self::State, action: &Self::Action) -> Self::State;
}
