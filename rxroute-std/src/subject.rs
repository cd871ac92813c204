//! # Multicast Replay Subject
//!
//! [`ReplaySubject`] is a publish/subscribe channel that remembers its most
//! recent value and hands it to every new subscriber before forwarding later
//! values as they are published.
//!
//! ## Rules
//! - **Replay one**: a late subscriber receives only the latest value, never history.
//! - **Multicast**: every active observer sees every value, in subscription order.
//! - **Re-entrant**: observers run outside the internal lock and may publish or
//!   subscribe again from inside `next`.
//! - **Single writer**: the replay to a new subscriber is ordered before live
//!   values only while `next` does not race `subscribe` from another thread.
//!   Router hooks fire serially, which keeps each adapter subject single-writer.
//! - **Explicit teardown**: dropping a [`Subscription`] does not detach it; call
//!   [`Subscription::unsubscribe`]. [`ReplayStream`] is the exception and detaches
//!   on drop.

use crate::observable::Observable;
use futures::{
    StreamExt,
    channel::mpsc::{self, UnboundedReceiver},
    stream::Stream,
};
use rxroute_core::{Message, Observer, SharedObserver};
use std::{
    fmt,
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    task::{Context, Poll},
};

struct Inner<T> {
    latest: Option<T>,
    observers: Vec<(u64, SharedObserver<T>)>,
    next_id: u64,
}

/// A multicast stream replaying its latest value to new subscribers.
///
/// Cloning is cheap and yields a handle to the same subject.
pub struct ReplaySubject<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

fn lock<T>(inner: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Message + Clone> ReplaySubject<T> {
    /// Create an empty subject.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                latest: None,
                observers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Publish a value to every observer and keep it for replay.
    pub fn next(&self, value: T) {
        let observers: Vec<SharedObserver<T>> = {
            let mut inner = lock(&self.inner);
            inner.latest = Some(value.clone());
            inner.observers.iter().map(|(_, o)| o.clone()).collect()
        };
        for observer in observers {
            observer.next(&value);
        }
    }

    /// Register an observer, replaying the latest value to it first.
    ///
    /// The replay runs after the internal lock is released. A `next` from
    /// another thread in between may reach the observer before the replay.
    pub fn subscribe<O: Observer<T>>(&self, observer: O) -> Subscription {
        let observer: SharedObserver<T> = Arc::new(observer);
        let (id, replay) = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.observers.push((id, observer.clone()));
            (id, inner.latest.clone())
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(id, replay = replay.is_some(), "subject subscribed");

        if let Some(value) = replay {
            observer.next(&value);
        }

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).observers.retain(|(oid, _)| *oid != id);

                #[cfg(feature = "tracing")]
                tracing::trace!(id, "subject unsubscribed");
            }
        })
    }

    /// A pull-side view yielding the replayed value, then every later one.
    pub fn stream(&self) -> ReplayStream<T> {
        let (tx, rx) = mpsc::unbounded();
        let subscription = self.subscribe(move |value: &T| {
            let _ = tx.unbounded_send(value.clone());
        });
        ReplayStream { rx, subscription }
    }

    /// A cold view of this subject, for composition.
    pub fn as_observable(&self) -> Observable<T> {
        let subject = self.clone();
        Observable::new(move || subject.stream().boxed())
    }

    /// The value a new subscriber would receive, if any.
    pub fn latest(&self) -> Option<T> {
        lock(&self.inner).latest.clone()
    }

    /// The number of attached observers.
    pub fn observer_count(&self) -> usize {
        lock(&self.inner).observers.len()
    }
}

impl<T: Message + Clone> Default for ReplaySubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ReplaySubject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for ReplaySubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("ReplaySubject")
            .field("observers", &inner.observers.len())
            .field("has_latest", &inner.latest.is_some())
            .finish()
    }
}

/// A handle to an active subscription.
///
/// Dropping the handle leaves the subscription attached.
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl Subscription {
    /// Create a subscription running `teardown` on unsubscribe.
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Detach from the stream. Later calls do nothing.
    pub fn unsubscribe(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    /// Whether [`unsubscribe`](Self::unsubscribe) has run.
    pub fn is_closed(&self) -> bool {
        self.teardown.is_none()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// A [`Stream`] over a [`ReplaySubject`]. Detaches when dropped.
pub struct ReplayStream<T> {
    rx: UnboundedReceiver<T>,
    subscription: Subscription,
}

impl<T> Stream for ReplayStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_next_unpin(cx)
    }
}

impl<T> Drop for ReplayStream<T> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(&u32) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v: &u32| sink.lock().unwrap().push(*v))
    }

    #[test]
    fn test_subscriber_sees_values_in_order() {
        let subject = ReplaySubject::<u32>::new();
        let (seen, observer) = recorder();
        let _sub = subject.subscribe(observer);

        subject.next(1);
        subject.next(2);
        subject.next(3);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_late_subscriber_gets_only_latest() {
        let subject = ReplaySubject::<u32>::new();
        subject.next(1);
        subject.next(2);
        subject.next(3);

        let (seen, observer) = recorder();
        let _sub = subject.subscribe(observer);
        assert_eq!(*seen.lock().unwrap(), vec![3]);

        subject.next(4);
        assert_eq!(*seen.lock().unwrap(), vec![3, 4]);
    }

    #[test]
    fn test_empty_subject_replays_nothing() {
        let subject = ReplaySubject::<u32>::new();
        let (seen, observer) = recorder();
        let _sub = subject.subscribe(observer);
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(subject.latest(), None);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let subject = ReplaySubject::<u32>::new();
        let (seen, observer) = recorder();
        let mut sub = subject.subscribe(observer);
        assert_eq!(subject.observer_count(), 1);

        sub.unsubscribe();
        sub.unsubscribe();
        assert!(sub.is_closed());
        assert_eq!(subject.observer_count(), 0);

        subject.next(9);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_dropping_subscription_keeps_observer() {
        let subject = ReplaySubject::<u32>::new();
        let (seen, observer) = recorder();
        drop(subject.subscribe(observer));

        subject.next(5);
        assert_eq!(*seen.lock().unwrap(), vec![5]);
    }

    #[test]
    fn test_observer_may_publish_reentrantly() {
        let subject = ReplaySubject::<u32>::new();
        let echo = subject.clone();
        let _sub = subject.subscribe(move |v: &u32| {
            if *v < 3 {
                echo.next(v + 1);
            }
        });

        subject.next(1);
        assert_eq!(subject.latest(), Some(3));
    }

    #[test]
    fn test_subscribe_during_delivery_replays_then_follows() {
        let subject = ReplaySubject::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let inner = subject.clone();
        let _sub = subject.subscribe(move |v: &u32| {
            if *v == 1 {
                let sink = sink.clone();
                let _ = inner.subscribe(move |v: &u32| sink.lock().unwrap().push(*v));
            }
        });

        subject.next(1);
        subject.next(2);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
        assert_eq!(subject.observer_count(), 2);
    }

    #[tokio::test]
    async fn test_stream_replays_then_follows() {
        let subject = ReplaySubject::<u32>::new();
        subject.next(10);

        let mut stream = subject.stream();
        subject.next(11);

        assert_eq!(stream.next().await, Some(10));
        assert_eq!(stream.next().await, Some(11));
        assert!(stream.next().now_or_never().is_none());
    }

    #[test]
    fn test_dropping_stream_detaches() {
        let subject = ReplaySubject::<u32>::new();
        let stream = subject.stream();
        assert_eq!(subject.observer_count(), 1);
        drop(stream);
        assert_eq!(subject.observer_count(), 0);
    }
}
