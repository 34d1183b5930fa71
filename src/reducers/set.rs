//! Ordered, tag-indexed collection of reducer entries.

use std::collections::HashMap;
use std::sync::Arc;

use crate::equality;
use crate::error::{ReducerFailure, StoreError};
use crate::mvi::{Action, State};

use super::entry::ReducerEntry;
use super::lens::FeatureLens;

/// Reducer entries for one state shape, in registration order.
///
/// Dispatching an action folds every entry registered for its tag, each one
/// receiving the previous entry's output. Entries for other tags are never
/// called.
pub struct ReducerSet<S, A: Action> {
    entries: Vec<ReducerEntry<S, A>>,
    index: HashMap<A::Tag, Vec<usize>>,
}

impl<S, A: Action> Clone for ReducerSet<S, A> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
        }
    }
}

impl<S: State, A: Action> Default for ReducerSet<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, A: Action> ReducerSet<S, A> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a pure reducer for a single tag.
    pub fn on<F>(mut self, tag: A::Tag, reduce: F) -> Self
    where
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        self.push(ReducerEntry::single(tag, reduce));
        self
    }

    /// Register a fallible reducer for a single tag.
    pub fn try_on<F>(mut self, tag: A::Tag, reduce: F) -> Self
    where
        F: Fn(&S, &A) -> Result<S, ReducerFailure> + Send + Sync + 'static,
    {
        self.push(ReducerEntry::single_fallible(tag, reduce));
        self
    }

    /// Register a pure reducer for several tags at once.
    ///
    /// # Errors
    /// Returns `StoreError::EmptyTagSet` if `tags` is empty.
    pub fn on_many<T, F>(mut self, tags: T, reduce: F) -> Result<Self, StoreError>
    where
        T: IntoIterator<Item = A::Tag>,
        F: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        self.push(ReducerEntry::new(tags, reduce)?);
        Ok(self)
    }

    pub fn with_entry(mut self, entry: ReducerEntry<S, A>) -> Self {
        self.push(entry);
        self
    }

    pub fn push(&mut self, entry: ReducerEntry<S, A>) {
        let position = self.entries.len();
        for tag in entry.tags() {
            self.index.entry(*tag).or_default().push(position);
        }
        self.entries.push(entry);
    }

    /// Append every entry of `other` after the entries of `self`.
    pub fn merge(mut self, other: Self) -> Self {
        for entry in other.entries {
            self.push(entry);
        }
        self
    }

    /// Concatenate several sets of the same shape, keeping their order.
    pub fn combine<I>(sets: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        sets.into_iter().fold(Self::new(), Self::merge)
    }

    /// Lift this set into a parent shape. See [`lift`](super::lift).
    pub fn lift<P, L>(self, lens: L) -> ReducerSet<P, A>
    where
        P: State,
        L: FeatureLens<P, S>,
    {
        super::lift::lift(self, lens)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry is registered for `tag`.
    pub fn handles(&self, tag: &A::Tag) -> bool {
        self.index.contains_key(tag)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ReducerEntry<S, A>> {
        self.entries.iter()
    }

    pub(crate) fn into_entries(self) -> Vec<ReducerEntry<S, A>> {
        self.entries
    }

    /// Fold the entries registered for the action's tag over `state`.
    ///
    /// Returns `state` itself (same `Arc`) when no entry matches or when
    /// every matching entry left the value unchanged.
    pub fn reduce(&self, state: &Arc<S>, action: &A) -> Result<Arc<S>, StoreError> {
        let Some(positions) = self.index.get(&action.tag()) else {
            return Ok(Arc::clone(state));
        };

        let mut current = Arc::clone(state);
        for position in positions {
            current = self.entries[*position].apply(&current, action)?;
        }
        // Entries that cancel out still hand back the input handle.
        Ok(equality::settle(state, current))
    }
}
