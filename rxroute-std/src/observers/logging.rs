//! Logging observer for stream inspection.

use rxroute_core::{Message, Observer};
use std::fmt::Debug;

/// An observer that logs every value it receives.
///
/// Logs at `info` level through `tracing` when the `tracing` feature is
/// enabled, and does nothing otherwise.
#[derive(Debug, Clone, Copy)]
pub struct LoggingObserver {
    stream: &'static str,
}

impl LoggingObserver {
    /// Create a logging observer tagging its output with `stream`.
    pub const fn new(stream: &'static str) -> Self {
        Self { stream }
    }

    /// The stream name attached to each log line.
    pub const fn stream(&self) -> &'static str {
        self.stream
    }
}

impl<T: Message + Debug> Observer<T> for LoggingObserver {
    fn next(&self, value: &T) {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(stream = self.stream, ?value, "router stream event");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = value;
        }
    }
}
