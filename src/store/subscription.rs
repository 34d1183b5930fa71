//! Push-based observation of store snapshots and dispatched actions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, Notify};

use crate::mvi::Action;
use crate::selector::Selector;

use super::Snapshot;

/// Cancellation handle shared by a subscription and whoever may cancel it.
///
/// Cancelling is idempotent, only affects its own subscription, and is safe
/// from inside that subscription's callback.
#[derive(Clone, Debug)]
pub struct SubscriptionHandle {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl SubscriptionHandle {
    pub(crate) fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called.
    pub async fn cancelled(&self) {
        // Register with Notify before checking the flag: a cancel() landing
        // between the check and the await would otherwise be lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// Stream of a selector's output over successive store states.
///
/// The first call to `next`/`try_next` yields the value over the state at
/// subscription time. After that a value is yielded only when it differs
/// from the last one yielded, or when the store was reset in between.
///
/// Snapshots are buffered per subscriber up to
/// [`StoreConfig::notification_capacity`](crate::config::StoreConfig). A
/// subscriber that falls further behind loses the oldest snapshots and
/// resumes from the oldest one still buffered; ordering is never changed.
pub struct Subscription<S, Sel: Selector<S>> {
    selector: Sel,
    receiver: broadcast::Receiver<Snapshot<S>>,
    pending: Option<Sel::Output>,
    last: (u64, Sel::Output),
    handle: SubscriptionHandle,
}

impl<S, Sel> Subscription<S, Sel>
where
    S: Send + Sync + 'static,
    Sel: Selector<S>,
{
    pub(crate) fn new(
        selector: Sel,
        snapshot: Snapshot<S>,
        receiver: broadcast::Receiver<Snapshot<S>>,
    ) -> Self {
        let initial = selector.select(&snapshot.state);
        Self {
            selector,
            receiver,
            pending: Some(initial.clone()),
            last: (snapshot.epoch, initial),
            handle: SubscriptionHandle::new(),
        }
    }

    /// Handle that cancels this subscription, usable from other tasks.
    pub fn handle(&self) -> SubscriptionHandle {
        self.handle.clone()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// Wait for the next changed value.
    ///
    /// Returns `None` once cancelled or once the store is gone.
    pub async fn next(&mut self) -> Option<Sel::Output> {
        if self.handle.is_cancelled() {
            return None;
        }
        if let Some(initial) = self.pending.take() {
            return Some(initial);
        }

        loop {
            let received = tokio::select! {
                biased;
                _ = self.handle.cancelled() => return None,
                received = self.receiver.recv() => received,
            };

            match received {
                Ok(snapshot) => {
                    if let Some(value) = self.accept(snapshot) {
                        return Some(value);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Subscriber lagging, oldest snapshots dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of `next`: drains buffered snapshots until one
    /// yields a changed value, or returns `None` when none does.
    pub fn try_next(&mut self) -> Option<Sel::Output> {
        if self.handle.is_cancelled() {
            return None;
        }
        if let Some(initial) = self.pending.take() {
            return Some(initial);
        }

        loop {
            match self.receiver.try_recv() {
                Ok(snapshot) => {
                    if let Some(value) = self.accept(snapshot) {
                        return Some(value);
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Subscriber lagging, oldest snapshots dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    fn accept(&mut self, snapshot: Snapshot<S>) -> Option<Sel::Output> {
        let value = self.selector.select(&snapshot.state);
        let (epoch, last) = &self.last;
        if *epoch == snapshot.epoch && *last == value {
            return None;
        }
        self.last = (snapshot.epoch, value.clone());
        Some(value)
    }
}

/// Stream of actions dispatched to a store, optionally filtered by tag.
///
/// Every successfully reduced action is delivered, including those that
/// left the state unchanged, after the resulting state was published.
pub struct ActionSubscription<A: Action> {
    receiver: broadcast::Receiver<Arc<A>>,
    filter: Option<A::Tag>,
}

impl<A: Action> ActionSubscription<A> {
    pub(crate) fn new(receiver: broadcast::Receiver<Arc<A>>, filter: Option<A::Tag>) -> Self {
        Self { receiver, filter }
    }

    pub async fn next(&mut self) -> Option<Arc<A>> {
        loop {
            match self.receiver.recv().await {
                Ok(action) => {
                    if self.matches(&action) {
                        return Some(action);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Action subscriber lagging, oldest actions dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    pub fn try_next(&mut self) -> Option<Arc<A>> {
        loop {
            match self.receiver.try_recv() {
                Ok(action) => {
                    if self.matches(&action) {
                        return Some(action);
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Action subscriber lagging, oldest actions dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    fn matches(&self, action: &A) -> bool {
        self.filter.map_or(true, |tag| action.tag() == tag)
    }
}
