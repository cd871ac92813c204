//! # rxroute - Reactive Streams over Router Lifecycle Hooks
//!
//! `rxroute` turns a state-based router's callback hooks into streams, so an
//! application can compose routing lifecycle events instead of registering
//! one callback per concern.
//!
//! ## Streams
//!
//! | field     | kind                   | emits |
//! |-----------|------------------------|-------|
//! | `start`   | hot, replays latest    | every transition as it starts |
//! | `success` | cold, from `start`     | transitions whose completion succeeded |
//! | `params`  | cold, from `success`   | the resolved parameters of each success |
//! | `states`  | hot, replays latest    | registry snapshots and registrations/deregistrations |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rxroute::{RouterRx, prelude::*};
//! use futures::StreamExt;
//!
//! let rx = RouterRx::new(&router)?;
//! let streams = rx.streams().clone();
//!
//! // Push style
//! let mut sub = streams.states.subscribe(|e: &StatesChangedEvent<MyState>| {
//!     println!("{} states registered", e.current_states.len());
//! });
//!
//! // Pull style, composed with `futures` combinators
//! let mut params = streams.params.stream();
//! while let Some(p) = params.next().await { /* ... */ }
//!
//! sub.unsubscribe();
//! rx.dispose();
//! ```
//!
//! The adapter never touches router-global state: wire the [`RouterStreams`]
//! bundle into whatever needs it.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use rxroute_core::{
    // Error types
    BoxError,
    // Router contract
    CompletionFuture,
    DeregisterFn,
    HookKind,
    // Payloads
    Message,
    // Consumers
    Observer,
    Plugin,
    Router,
    RxError,
    SharedObserver,
    StartHook,
    StatesChangedEvent,
    StatesChangedHook,
    StatesChangedKind,
    Transition,
};

pub use rxroute_std::{
    Observable, PLUGIN_NAME, ReplayStream, ReplaySubject, RouterRx, RouterStreams, Subscription,
};

/// Standard observer implementations.
pub mod observers {
    pub use rxroute_std::observers::LoggingObserver;
}

/// Testing utilities.
pub mod testing {
    pub use rxroute_std::testing::{
        MockParams, MockRouter, MockTransition, RecordingObserver, TransitionControl,
    };
}

/// Prelude module - common imports for rxroute.
///
/// # Usage
///
/// ```rust,ignore
/// use rxroute::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Message, Observable, Observer, Plugin, ReplaySubject, Router, RouterRx, RouterStreams,
        RxError, StatesChangedEvent, StatesChangedKind, Subscription, Transition,
    };
}
