//! # Observers
//!
//! The push side of a stream. An [`Observer`] receives each value a stream
//! publishes, in publication order, by reference.
//!
//! Any `Fn(&T) + Send + Sync + 'static` closure is an observer, so most
//! callers never implement the trait by hand:
//!
//! ```rust,ignore
//! let sub = streams.start.subscribe(|t: &MyTransition| println!("{t:?}"));
//! ```

use std::sync::Arc;

/// Receives the values published by a stream.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot observe values of type `{T}`",
    label = "missing `Observer` implementation",
    note = "Implement `Observer<{T}>` or pass a `Fn(&{T})` closure."
)]
pub trait Observer<T>: Send + Sync + 'static {
    /// Called with every published value.
    fn next(&self, value: &T);
}

impl<T, F> Observer<T> for F
where
    F: Fn(&T) + Send + Sync + 'static,
{
    fn next(&self, value: &T) {
        self(value)
    }
}

/// A shared, type-erased observer.
pub type SharedObserver<T> = Arc<dyn Observer<T>>;
