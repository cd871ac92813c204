//! Router plugin identity.

/// An extension attached to a router for its lifetime.
///
/// Plugins register hooks on construction and detach them in
/// [`dispose`](Plugin::dispose). Disposing twice must be harmless.
pub trait Plugin: Send + Sync {
    /// A stable, human readable plugin name.
    fn name(&self) -> &'static str;

    /// Detaches every hook this plugin registered.
    fn dispose(&self);
}
