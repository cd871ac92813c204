//! Message trait for stream payloads.

/// A marker trait for values carried by router event streams.
///
/// Messages must be `Send + Sync + 'static` so they can cross subscriber
/// tasks and live inside replay buffers.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct HomeState { name: &'static str }
///
/// fn publish<M: Message>(_: M) {}
/// publish(HomeState { name: "home" });
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Values published on router streams must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

// Every thread-safe static type can travel through a stream.
impl<T: Send + Sync + 'static> Message for T {}
