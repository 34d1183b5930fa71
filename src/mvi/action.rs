//! Base trait for actions (user/system events).

use std::fmt::Debug;
use std::hash::Hash;

/// An immutable event fed to the store.
///
/// Actions are usually a closed enum. `Tag` is a field-less mirror of its
/// variants, so reducer entries can be registered for a variant without
/// constructing an instance of it.
///
/// ```
/// use unistore::mvi::Action;
///
/// #[derive(Debug)]
/// enum CounterAction {
///     Add(i64),
///     Clear,
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum CounterTag {
///     Add,
///     Clear,
/// }
///
/// impl Action for CounterAction {
///     type Tag = CounterTag;
///
///     fn tag(&self) -> CounterTag {
///         match self {
///             CounterAction::Add(_) => CounterTag::Add,
///             CounterAction::Clear => CounterTag::Clear,
///         }
///     }
/// }
///
/// assert_eq!(CounterAction::Add(2).tag(), CounterTag::Add);
/// ```
pub trait Action: Debug + Send + Sync + 'static {
    /// Discriminator used to index reducer entries.
    type Tag: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// The discriminator of this action.
    fn tag(&self) -> Self::Tag;
}
