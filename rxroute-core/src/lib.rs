//! # rxroute-core
//!
//! Core traits for bridging a state-based router's lifecycle hooks into
//! reactive streams.
//!
//! This crate has minimal dependencies and is designed to be implemented by
//! routers that want to feed `rxroute-std` without pulling in the stream
//! machinery themselves.
//!
//! # Contracts
//!
//! ## Host side ([`Router`], [`Transition`])
//!
//! What the router must expose: a transition-start hook registrar, a
//! states-changed hook registrar, a registry snapshot accessor, and
//! transitions carrying a completion future and resolved parameters.
//!
//! ## Payloads ([`Message`], [`StatesChangedEvent`])
//!
//! Everything flowing through a stream is a `Message`. Registry changes are
//! normalised into `StatesChangedEvent` records.
//!
//! ## Consumer side ([`Observer`])
//!
//! Push-style receivers of stream values. Closures work out of the box.
//!
//! # Error Types
//!
//! - [`RxError`] - Top-level error type
//! - [`HookKind`] - Which hook failed to register

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod event;
mod message;
mod observer;
mod plugin;
mod router;

// Re-exports
pub use error::{BoxError, HookKind, RxError};
pub use event::StatesChangedEvent;
pub use message::Message;
pub use observer::{Observer, SharedObserver};
pub use plugin::Plugin;
pub use router::{
    CompletionFuture, DeregisterFn, Router, StartHook, StatesChangedHook, StatesChangedKind,
    Transition,
};
