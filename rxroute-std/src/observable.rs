//! # Cold Derived Streams
//!
//! An [`Observable`] is a recipe for a stream rather than a running one: each
//! call to [`Observable::stream`] builds a fresh [`BoxStream`] with its own
//! upstream subscription. Streams derived from a [`ReplaySubject`] therefore
//! inherit its replay of the latest value for every new subscriber.
//!
//! Composition reuses the `futures` combinators through [`Observable::pipe`]:
//!
//! ```rust,ignore
//! let doubled = subject.as_observable().pipe(|s| s.map(|v| v * 2).boxed());
//! ```
//!
//! [`ReplaySubject`]: crate::subject::ReplaySubject

use crate::subject::Subscription;
use futures::{
    FutureExt, StreamExt,
    future::{self, abortable},
    stream::BoxStream,
    task::{Spawn, SpawnExt},
};
use rxroute_core::{Message, Observer, RxError};
use std::{fmt, sync::Arc};

type Factory<T> = dyn Fn() -> BoxStream<'static, T> + Send + Sync + 'static;

/// A cold stream: every subscriber drives its own instance.
pub struct Observable<T> {
    factory: Arc<Factory<T>>,
}

impl<T: Message> Observable<T> {
    /// Create an observable from a stream factory.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> BoxStream<'static, T> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Build a new stream instance.
    pub fn stream(&self) -> BoxStream<'static, T> {
        (self.factory)()
    }

    /// Derive a new observable by transforming every stream instance.
    pub fn pipe<U, F>(&self, op: F) -> Observable<U>
    where
        U: Message,
        F: Fn(BoxStream<'static, T>) -> BoxStream<'static, U> + Send + Sync + 'static,
    {
        let source = self.clone();
        Observable::new(move || op(source.stream()))
    }

    /// Drive a new stream instance into `observer` on `spawner`.
    ///
    /// The returned [`Subscription`] aborts the task on unsubscribe.
    pub fn subscribe<S, O>(&self, spawner: &S, observer: O) -> Result<Subscription, RxError>
    where
        S: Spawn + ?Sized,
        O: Observer<T>,
    {
        let drive = self.stream().for_each(move |value| {
            observer.next(&value);
            future::ready(())
        });
        let (task, handle) = abortable(drive);
        spawner
            .spawn(task.map(|_| ()))
            .map_err(|e| RxError::Spawn(Box::new(e)))?;
        Ok(Subscription::new(move || handle.abort()))
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable").finish_non_exhaustive()
    }
}
