//! # rxroute-std
//!
//! Standard implementations for the rxroute router event streams.
//!
//! This crate provides:
//! - **Replay subjects**: [`ReplaySubject`], [`Subscription`], [`ReplayStream`]
//! - **Derived streams**: [`Observable`]
//! - **Router adapter**: [`RouterRx`], [`RouterStreams`]
//! - **Standard observers**: Logging
//! - **Testing**: in-memory router and recording observers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use rxroute_core;

// Modules
pub mod adapter;
pub mod observable;
pub mod observers;
pub mod subject;
pub mod testing;

pub use adapter::{PLUGIN_NAME, RouterRx, RouterStreams};
pub use observable::Observable;
pub use subject::{ReplayStream, ReplaySubject, Subscription};
