//! Error types for rxroute.
//!
//! The adapter introduces almost no failure modes of its own:
//!
//! - [`RxError`] - Top-level error type for construction and subscription
//! - [`HookKind`] - Names the router hook whose registration failed
//!
//! Rejected transitions are not errors here. They are dropped from the
//! success and params streams without notification.

use std::fmt;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The router hooks the adapter registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Fired at the start of every transition.
    TransitionStart,
    /// Fired whenever the state registry changes.
    StatesChanged,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::TransitionStart => f.write_str("transition start"),
            HookKind::StatesChanged => f.write_str("states changed"),
        }
    }
}

/// Top-level error type for rxroute operations.
#[derive(Error, Debug)]
pub enum RxError {
    /// The router refused a hook registration.
    #[error("failed to register {hook} hook")]
    Registration {
        /// The hook being registered.
        hook: HookKind,
        /// The router's error.
        #[source]
        source: BoxError,
    },

    /// A subscriber task could not be spawned on the given executor.
    #[error("failed to spawn subscriber task")]
    Spawn(#[source] BoxError),
}

impl RxError {
    /// Wraps a router error raised while registering `hook`.
    pub fn registration(hook: HookKind, source: impl Into<BoxError>) -> Self {
        RxError::Registration {
            hook,
            source: source.into(),
        }
    }
}
