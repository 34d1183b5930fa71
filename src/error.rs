//! Error types for reduction and dispatch.

use thiserror::Error;

/// Errors that can occur while building reducer sets or dispatching.
///
/// None of these are transient: each one is a wiring mistake or a reducer
/// reporting a failure, so nothing here is retried.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A reducer entry was declared without any action tag.
    #[error("Reducer entry must handle at least one action tag")]
    EmptyTagSet,

    /// A fallible reducer rejected the action.
    #[error("Reducer for action {tag} failed: {source}")]
    Reducer {
        tag: String,
        #[source]
        source: ReducerFailure,
    },

    /// No field of the parent holds the selected feature.
    #[error("A sub-reducer cannot find the feature `{feature}` inside `{parent}`")]
    FeatureNotFound {
        feature: &'static str,
        parent: &'static str,
    },

    /// Several fields of the parent hold the selected feature.
    #[error("A sub-reducer found the feature `{feature}` in more than one field of `{parent}`")]
    AmbiguousFeature {
        feature: &'static str,
        parent: &'static str,
    },

    /// `dispatch` or `reset` was called while a reducer was running on this
    /// thread.
    #[error("Dispatch or reset called from inside a reducer")]
    ReentrantDispatch,

    /// A callback subscription needs a tokio runtime to run on.
    #[error("No tokio runtime available to run the subscription")]
    NoRuntime,
}

/// Failure reported by a fallible reducer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ReducerFailure {
    message: String,
}

impl ReducerFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
