//! # Host Router Contract
//!
//! The traits a state-based router implements so its lifecycle hooks can be
//! bridged into streams. The router keeps ownership of the transition state
//! machine and the state registry; rxroute only listens.
//!
//! # Hooks
//!
//! - [`Router::on_start`] - called at the start of every transition
//! - [`Router::on_states_changed`] - called when declarations are added or removed
//!
//! Each registration returns a [`DeregisterFn`] that detaches the hook again.

use crate::{error::BoxError, message::Message};
use std::{fmt, future::Future, pin::Pin};

/// A boxed, `'static` completion future.
pub type CompletionFuture = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'static>>;

/// Detaches a previously registered hook when called.
pub type DeregisterFn = Box<dyn FnOnce() + Send + 'static>;

/// Callback invoked with every transition as it starts.
pub type StartHook<T> = Box<dyn Fn(&T) + Send + Sync + 'static>;

/// Callback invoked with the change kind and the affected declarations.
pub type StatesChangedHook<S> = Box<dyn Fn(StatesChangedKind, &[S]) + Send + Sync + 'static>;

/// Which way the state registry changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatesChangedKind {
    /// Declarations were added to the registry.
    Registered,
    /// Declarations were removed from the registry.
    Deregistered,
}

impl StatesChangedKind {
    /// The event field this kind populates.
    pub const fn as_str(&self) -> &'static str {
        match self {
            StatesChangedKind::Registered => "registered",
            StatesChangedKind::Deregistered => "deregistered",
        }
    }
}

impl fmt::Display for StatesChangedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single navigation attempt, owned by the router.
///
/// Cloning a transition must yield a handle to the same attempt: the adapter
/// republishes clones and never mutates them.
pub trait Transition: Message + Clone {
    /// The resolved parameter mapping of the target state.
    type Params: Message + Clone;

    /// A future settling when the transition finishes.
    ///
    /// `Ok` means the transition succeeded. Aborted, failed and superseded
    /// transitions resolve to `Err` or never resolve at all.
    fn completion(&self) -> CompletionFuture;

    /// The resolved parameters of this transition.
    fn params(&self) -> Self::Params;
}

/// The router surface consumed by the stream adapter.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be bridged into router streams",
    label = "missing `Router` implementation",
    note = "Implement `on_start`, `on_states_changed` and `current_states` for `{Self}`."
)]
pub trait Router: Send + Sync + 'static {
    /// The router's transition type.
    type Transition: Transition;
    /// The router's state declaration type.
    type State: Message + Clone;

    /// Registers a hook called at the start of every transition.
    fn on_start(&self, hook: StartHook<Self::Transition>) -> Result<DeregisterFn, BoxError>;

    /// Registers a hook called whenever the state registry changes.
    fn on_states_changed(
        &self,
        hook: StatesChangedHook<Self::State>,
    ) -> Result<DeregisterFn, BoxError>;

    /// The full current contents of the state registry.
    fn current_states(&self) -> Vec<Self::State>;
}
