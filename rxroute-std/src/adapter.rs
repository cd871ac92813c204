//! # Router Stream Adapter
//!
//! [`RouterRx`] registers itself on a [`Router`]'s transition-start and
//! states-changed hooks and republishes what they report as four streams:
//!
//! ```text
//!  on_start ───────► start ──┬─► success ───► params
//!                  (replay 1) │  (awaits each      (Transition::params)
//!                             │   completion)
//!  on_states_changed ─► states
//!                     (replay 1, primed with a snapshot)
//! ```
//!
//! `start` and `states` are hot [`ReplaySubject`]s. `success` and `params`
//! are cold [`Observable`]s composed from `start`, so each subscriber awaits
//! completions on its own and receives the latest transition on subscribe.
//!
//! Transitions whose completion fails or never settles never reach `success`
//! or `params`. Nothing is reported for them.

use crate::{observable::Observable, subject::ReplaySubject};
use futures::{FutureExt, StreamExt, future};
use rxroute_core::{
    DeregisterFn, HookKind, Plugin, Router, RxError, StatesChangedEvent, StatesChangedKind,
    Transition,
};
use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

/// The name [`RouterRx`] reports through [`Plugin::name`].
pub const PLUGIN_NAME: &str = "rxroute";

/// The four router streams, as named fields.
pub struct RouterStreams<T: Transition, S> {
    /// Every transition as it starts, in firing order.
    pub start: ReplaySubject<T>,
    /// Transitions whose completion succeeded, in completion order.
    pub success: Observable<T>,
    /// Resolved parameters of each successful transition.
    pub params: Observable<T::Params>,
    /// State registry snapshots and changes.
    pub states: ReplaySubject<StatesChangedEvent<S>>,
}

impl<T: Transition, S> Clone for RouterStreams<T, S> {
    fn clone(&self) -> Self {
        Self {
            start: self.start.clone(),
            success: self.success.clone(),
            params: self.params.clone(),
            states: self.states.clone(),
        }
    }
}

impl<T: Transition, S> fmt::Debug for RouterStreams<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterStreams")
            .field("start", &self.start)
            .field("success", &self.success)
            .field("params", &self.params)
            .field("states", &self.states)
            .finish()
    }
}

/// Bridges a router's lifecycle hooks into [`RouterStreams`].
pub struct RouterRx<R: Router> {
    streams: RouterStreams<R::Transition, R::State>,
    deregister_fns: Mutex<Vec<DeregisterFn>>,
}

impl<R: Router> RouterRx<R> {
    /// Attach to `router` and start publishing.
    ///
    /// The `states` stream is primed with the current registry contents
    /// before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`RxError::Registration`] if the router rejects a hook. This
    /// does not just propagate the router's error: any hook already
    /// registered by this call is detached first, so a failed construction
    /// leaves nothing attached to the router.
    pub fn new(router: &Arc<R>) -> Result<Self, RxError> {
        let start = ReplaySubject::<R::Transition>::new();
        let success = start.as_observable().pipe(|transitions| {
            transitions
                .flat_map_unordered(None::<usize>, |transition: R::Transition| {
                    let completion = transition.completion();
                    async move { completion.await.ok().map(|()| transition) }
                        .into_stream()
                        .filter_map(future::ready)
                        .boxed()
                })
                .boxed()
        });
        let params = success.pipe(|succeeded| succeeded.map(|t| t.params()).boxed());
        let states = ReplaySubject::<StatesChangedEvent<R::State>>::new();

        let mut deregister_fns = Vec::with_capacity(2);

        let start_sink = start.clone();
        let on_start = router.on_start(Box::new(move |transition: &R::Transition| {
            #[cfg(feature = "tracing")]
            tracing::trace!("transition started");

            start_sink.next(transition.clone());
        }));
        match on_start {
            Ok(deregister) => deregister_fns.push(deregister),
            Err(e) => return Err(RxError::registration(HookKind::TransitionStart, e)),
        }

        let weak = Arc::downgrade(router);
        let states_sink = states.clone();
        let on_states_changed = router.on_states_changed(Box::new(
            move |kind: StatesChangedKind, changed: &[R::State]| {
                let Some(router) = weak.upgrade() else {
                    return;
                };

                #[cfg(feature = "tracing")]
                tracing::debug!(%kind, count = changed.len(), "state registry changed");

                states_sink.next(StatesChangedEvent::changed(
                    kind,
                    changed.to_vec(),
                    router.current_states(),
                ));
            },
        ));
        match on_states_changed {
            Ok(deregister) => deregister_fns.push(deregister),
            Err(e) => {
                for deregister in deregister_fns.drain(..) {
                    deregister();
                }
                return Err(RxError::registration(HookKind::StatesChanged, e));
            }
        }

        states.next(StatesChangedEvent::snapshot(router.current_states()));

        #[cfg(feature = "tracing")]
        tracing::debug!(plugin = PLUGIN_NAME, "router streams attached");

        Ok(Self {
            streams: RouterStreams {
                start,
                success,
                params,
                states,
            },
            deregister_fns: Mutex::new(deregister_fns),
        })
    }

    /// The streams fed by this adapter.
    pub fn streams(&self) -> &RouterStreams<R::Transition, R::State> {
        &self.streams
    }

    /// The number of router hooks still attached.
    pub fn attached_hooks(&self) -> usize {
        self.deregister_fns
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Detach every router hook. Streams stay open and subscribers stay
    /// attached; they simply stop receiving router events.
    pub fn dispose(&self) {
        let deregister_fns = std::mem::take(
            &mut *self
                .deregister_fns
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(hooks = deregister_fns.len(), "router streams disposed");

        for deregister in deregister_fns {
            deregister();
        }
    }
}

impl<R: Router> Plugin for RouterRx<R> {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn dispose(&self) {
        RouterRx::dispose(self);
    }
}

impl<R: Router> fmt::Debug for RouterRx<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterRx")
            .field("streams", &self.streams)
            .field("attached_hooks", &self.attached_hooks())
            .finish()
    }
}
