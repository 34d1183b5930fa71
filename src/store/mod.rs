//! The store: owner of the current state and arbiter of dispatch.
//!
//! Dispatch and reset are serialized by a writer lock. The current snapshot
//! sits behind its own read/write lock that is only write-held while a
//! reduced state is adopted and published, so reads never wait on a running
//! reducer and a reducer may read the store it runs in. Adopted snapshots are
//! published on a broadcast channel under that write lock, so every
//! subscriber sees transitions in the order they happened. Selectors and
//! callbacks run on the subscriber's side, never under either lock.

mod subscription;

use std::cell::Cell;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;

use crate::config::StoreConfig;
use crate::equality;
use crate::error::StoreError;
use crate::mvi::{Action, State};
use crate::reducers::ReducerSet;
use crate::selector::{Selector, WholeState};

pub use subscription::{ActionSubscription, Subscription, SubscriptionHandle};

thread_local! {
    static REDUCING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as running reducers until dropped.
struct ReducingGuard;

impl ReducingGuard {
    fn enter() -> Self {
        REDUCING.with(|flag| flag.set(true));
        Self
    }
}

impl Drop for ReducingGuard {
    fn drop(&mut self) {
        REDUCING.with(|flag| flag.set(false));
    }
}

/// State as published to subscribers.
#[derive(Debug)]
pub(crate) struct Snapshot<S> {
    pub(crate) state: Arc<S>,
    /// Bumped by every reset.
    pub(crate) epoch: u64,
    /// Bumped by every adopted change, including resets.
    pub(crate) version: u64,
}

impl<S> Clone for Snapshot<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            epoch: self.epoch,
            version: self.version,
        }
    }
}

struct StoreInner<S, A: Action> {
    reducers: ReducerSet<S, A>,
    writer: Mutex<()>,
    current: RwLock<Snapshot<S>>,
    states: broadcast::Sender<Snapshot<S>>,
    actions: broadcast::Sender<Arc<A>>,
    config: StoreConfig,
}

/// Single owner of an `Arc<S>` that only changes through its reducer set.
///
/// Cloning a `Store` yields another handle to the same state.
pub struct Store<S: State, A: Action> {
    inner: Arc<StoreInner<S, A>>,
}

impl<S: State, A: Action> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: State, A: Action> Store<S, A> {
    /// Create a store starting from `S::default()`.
    pub fn new(reducers: ReducerSet<S, A>) -> Self {
        Self::with_config(reducers, S::default(), StoreConfig::default())
    }

    pub fn with_state(reducers: ReducerSet<S, A>, initial: S) -> Self {
        Self::with_config(reducers, initial, StoreConfig::default())
    }

    /// Zero capacities in `config` are raised to 1.
    pub fn with_config(reducers: ReducerSet<S, A>, initial: S, config: StoreConfig) -> Self {
        let (states, _) = broadcast::channel(config.notification_capacity.max(1));
        let (actions, _) = broadcast::channel(config.action_capacity.max(1));

        tracing::debug!(
            entries = reducers.len(),
            notification_capacity = config.notification_capacity,
            "Store created"
        );

        Self {
            inner: Arc::new(StoreInner {
                reducers,
                writer: Mutex::new(()),
                current: RwLock::new(Snapshot {
                    state: Arc::new(initial),
                    epoch: 0,
                    version: 0,
                }),
                states,
                actions,
                config,
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// The present state. Never a partially reduced value.
    pub fn current(&self) -> Arc<S> {
        Arc::clone(&self.inner.current.read().state)
    }

    /// Number of adopted changes (resets included) since creation.
    pub fn version(&self) -> u64 {
        self.inner.current.read().version
    }

    /// Evaluate `selector` over the present state.
    pub fn select<Sel: Selector<S>>(&self, selector: &Sel) -> Sel::Output {
        selector.select(&self.current())
    }

    /// Reduce `action` against the current state and publish the result if
    /// it differs.
    ///
    /// # Errors
    /// Propagates reducer and wiring errors; the state stays the last
    /// known-good one. Returns `StoreError::ReentrantDispatch` when called
    /// from inside a reducer.
    pub fn dispatch(&self, action: A) -> Result<(), StoreError> {
        let tag = action.tag();
        if REDUCING.with(Cell::get) {
            tracing::error!(tag = ?tag, "Dispatch called from inside a reducer");
            return Err(StoreError::ReentrantDispatch);
        }

        let action = Arc::new(action);
        let _writer = self.inner.writer.lock();
        let previous = Arc::clone(&self.inner.current.read().state);

        let reduced = {
            let _guard = ReducingGuard::enter();
            self.inner.reducers.reduce(&previous, &action)
        };
        let next = match reduced {
            Ok(next) => next,
            Err(err) => {
                tracing::error!(tag = ?tag, error = %err, "Dispatch aborted, state unchanged");
                return Err(err);
            }
        };

        if equality::same(&previous, &next) {
            tracing::trace!(tag = ?tag, "Dispatch left state unchanged");
        } else {
            let mut current = self.inner.current.write();
            current.state = next;
            current.version += 1;
            if self.inner.config.log_transitions {
                tracing::debug!(
                    tag = ?tag,
                    version = current.version,
                    epoch = current.epoch,
                    "State transition adopted"
                );
            }
            // No receivers is not an error.
            let _ = self.inner.states.send(current.clone());
        }

        let _ = self.inner.actions.send(action);
        Ok(())
    }

    /// Replace the state with `S::default()` and start a new epoch.
    ///
    /// Live subscriptions emit once for the fresh state even if their
    /// projection equals the last value they emitted.
    ///
    /// # Errors
    /// Returns `StoreError::ReentrantDispatch` when called from inside a
    /// reducer.
    pub fn reset(&self) -> Result<(), StoreError> {
        if REDUCING.with(Cell::get) {
            tracing::error!("Reset called from inside a reducer");
            return Err(StoreError::ReentrantDispatch);
        }

        let _writer = self.inner.writer.lock();
        let mut current = self.inner.current.write();
        current.state = Arc::new(S::default());
        current.epoch += 1;
        current.version += 1;

        tracing::info!(epoch = current.epoch, "Store reset");
        let _ = self.inner.states.send(current.clone());
        Ok(())
    }

    /// Observe `selector` over this store's states.
    pub fn observe<Sel: Selector<S>>(&self, selector: Sel) -> Subscription<S, Sel> {
        // Subscribe under the lock so no transition falls between the
        // initial snapshot and the first buffered one.
        let (snapshot, receiver) = {
            let current = self.inner.current.read();
            (current.clone(), self.inner.states.subscribe())
        };
        Subscription::new(selector, snapshot, receiver)
    }

    /// Observe the whole state.
    pub fn observe_state(&self) -> Subscription<S, WholeState<S>> {
        self.observe(WholeState::new())
    }

    /// Run `callback` on a tokio task for every value `observe(selector)`
    /// yields, until the returned handle is cancelled or the store dropped.
    ///
    /// The callback also receives the handle, so it can cancel itself. A
    /// panicking callback ends only its own task.
    ///
    /// # Errors
    /// Returns `StoreError::NoRuntime` outside a tokio runtime.
    pub fn subscribe<Sel, C>(
        &self,
        selector: Sel,
        mut callback: C,
    ) -> Result<SubscriptionHandle, StoreError>
    where
        Sel: Selector<S>,
        C: FnMut(Sel::Output, &SubscriptionHandle) + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| StoreError::NoRuntime)?;

        let mut subscription = self.observe(selector);
        let handle = subscription.handle();
        let task_handle = handle.clone();

        runtime.spawn(async move {
            while let Some(value) = subscription.next().await {
                callback(value, &task_handle);
                if task_handle.is_cancelled() {
                    break;
                }
            }
            tracing::trace!("Subscription task finished");
        });

        Ok(handle)
    }

    /// Observe every action dispatched from now on.
    pub fn observe_actions(&self) -> ActionSubscription<A> {
        ActionSubscription::new(self.inner.actions.subscribe(), None)
    }

    /// Observe dispatched actions carrying `tag`.
    pub fn observe_action(&self, tag: A::Tag) -> ActionSubscription<A> {
        ActionSubscription::new(self.inner.actions.subscribe(), Some(tag))
    }
}
