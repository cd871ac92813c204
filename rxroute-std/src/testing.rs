//! Testing utilities for rxroute.
//!
//! This module provides an in-memory router and recording observers so the
//! adapter and downstream code can be exercised without a real router.
//!
//! # Features
//!
//! - [`RecordingObserver`]: An observer that records every value it receives
//! - [`MockRouter`]: A router with a state registry and controllable hooks
//! - [`MockTransition`]: A transition whose completion is driven by the test
//! - [`TransitionControl`]: Resolves or rejects a pending [`MockTransition`]

use futures::{
    FutureExt,
    channel::oneshot,
    future::{self, BoxFuture, Shared},
};
use rxroute_core::{
    BoxError, CompletionFuture, DeregisterFn, HookKind, Message, Observer, Router, StartHook,
    StatesChangedHook, StatesChangedKind, Transition,
};
use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Recording Observer
// ============================================================================

/// An observer that records all values it receives.
///
/// Clones share the same record, so keep one clone for assertions and hand
/// the other to `subscribe`.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingObserver::new();
/// let _sub = streams.start.subscribe(recorder.clone());
///
/// router.start_transition(MockTransition::new(1));
/// assert_eq!(recorder.count(), 1);
/// ```
pub struct RecordingObserver<T> {
    values: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone> RecordingObserver<T> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded values.
    pub fn values(&self) -> Vec<T> {
        lock(&self.values).clone()
    }

    /// Get the most recently recorded value.
    pub fn last(&self) -> Option<T> {
        lock(&self.values).last().cloned()
    }

    /// Get the number of recorded values.
    pub fn count(&self) -> usize {
        lock(&self.values).len()
    }

    /// Clear all recorded values.
    pub fn clear(&self) {
        lock(&self.values).clear();
    }
}

impl<T: Clone> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecordingObserver<T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
        }
    }
}

impl<T: Message + Clone> Observer<T> for RecordingObserver<T> {
    fn next(&self, value: &T) {
        lock(&self.values).push(value.clone());
    }
}

// ============================================================================
// Mock Transition
// ============================================================================

/// Parameters carried by a [`MockTransition`].
pub type MockParams = BTreeMap<String, String>;

type Outcome = Result<(), String>;

/// A transition with an id, parameters, and a test-driven completion.
#[derive(Clone)]
pub struct MockTransition {
    id: u64,
    params: MockParams,
    completion: Shared<BoxFuture<'static, Outcome>>,
}

impl MockTransition {
    /// A transition that has already completed successfully.
    pub fn new(id: u64) -> Self {
        Self::settled(id, Ok(()))
    }

    /// A transition that has already failed with `reason`.
    pub fn rejected(id: u64, reason: impl Into<String>) -> Self {
        Self::settled(id, Err(reason.into()))
    }

    /// A transition that settles once `TransitionControl` says so.
    ///
    /// Dropping the control without settling leaves it pending forever.
    pub fn pending(id: u64) -> (Self, TransitionControl) {
        let (tx, rx) = oneshot::channel::<Outcome>();
        let completion = async move {
            match rx.await {
                Ok(outcome) => outcome,
                Err(_) => future::pending().await,
            }
        }
        .boxed()
        .shared();
        let transition = Self {
            id,
            params: MockParams::new(),
            completion,
        };
        (transition, TransitionControl { tx })
    }

    fn settled(id: u64, outcome: Outcome) -> Self {
        Self {
            id,
            params: MockParams::new(),
            completion: future::ready(outcome).boxed().shared(),
        }
    }

    /// Add a resolved parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// The transition id.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl PartialEq for MockTransition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.params == other.params
    }
}

impl fmt::Debug for MockTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransition")
            .field("id", &self.id)
            .field("params", &self.params)
            .finish()
    }
}

impl Transition for MockTransition {
    type Params = MockParams;

    fn completion(&self) -> CompletionFuture {
        let completion = self.completion.clone();
        Box::pin(async move { completion.await.map_err(BoxError::from) })
    }

    fn params(&self) -> Self::Params {
        self.params.clone()
    }
}

/// Settles a pending [`MockTransition`].
pub struct TransitionControl {
    tx: oneshot::Sender<Outcome>,
}

impl TransitionControl {
    /// Complete the transition successfully.
    pub fn resolve(self) {
        let _ = self.tx.send(Ok(()));
    }

    /// Fail the transition with `reason`.
    pub fn reject(self, reason: impl Into<String>) {
        let _ = self.tx.send(Err(reason.into()));
    }
}

// ============================================================================
// Mock Router
// ============================================================================

type SharedStartHook = Arc<dyn Fn(&MockTransition) + Send + Sync + 'static>;
type SharedStatesHook<S> = Arc<dyn Fn(StatesChangedKind, &[S]) + Send + Sync + 'static>;

struct RouterState<S> {
    states: Vec<S>,
    start_hooks: Vec<(u64, SharedStartHook)>,
    states_hooks: Vec<(u64, SharedStatesHook<S>)>,
    next_id: u64,
    failing: Option<HookKind>,
}

/// An in-memory router with a state registry and hook lists.
///
/// Hooks run outside the internal lock, so they may read the registry back
/// through [`Router::current_states`].
///
/// # Example
///
/// ```rust,ignore
/// let router = Arc::new(MockRouter::with_states(vec!["home"]));
/// let rx = RouterRx::new(&router)?;
///
/// router.register(vec!["about"]);
/// router.start_transition(MockTransition::new(1));
/// ```
pub struct MockRouter<S> {
    inner: Arc<Mutex<RouterState<S>>>,
}

impl<S: Message + Clone> MockRouter<S> {
    /// Create a router with an empty registry.
    pub fn new() -> Self {
        Self::with_states(Vec::new())
    }

    /// Create a router whose registry starts with `states`.
    pub fn with_states(states: Vec<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RouterState {
                states,
                start_hooks: Vec::new(),
                states_hooks: Vec::new(),
                next_id: 0,
                failing: None,
            })),
        }
    }

    /// Make the next registrations of `hook` fail.
    pub fn fail_registration(&self, hook: HookKind) {
        lock(&self.inner).failing = Some(hook);
    }

    /// Fire every transition-start hook with `transition`.
    pub fn start_transition(&self, transition: MockTransition) {
        let hooks: Vec<SharedStartHook> = lock(&self.inner)
            .start_hooks
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for hook in hooks {
            hook(&transition);
        }
    }

    /// Add `states` to the registry and notify states-changed hooks.
    pub fn register(&self, states: Vec<S>) {
        let hooks = {
            let mut inner = lock(&self.inner);
            inner.states.extend(states.iter().cloned());
            Self::states_hooks(&inner)
        };
        for hook in hooks {
            hook(StatesChangedKind::Registered, &states);
        }
    }

    /// Number of attached transition-start hooks.
    pub fn start_hook_count(&self) -> usize {
        lock(&self.inner).start_hooks.len()
    }

    /// Number of attached states-changed hooks.
    pub fn states_hook_count(&self) -> usize {
        lock(&self.inner).states_hooks.len()
    }

    fn states_hooks(inner: &RouterState<S>) -> Vec<SharedStatesHook<S>> {
        inner.states_hooks.iter().map(|(_, h)| h.clone()).collect()
    }

    fn check_registration(&self, hook: HookKind) -> Result<u64, BoxError> {
        let mut inner = lock(&self.inner);
        if inner.failing == Some(hook) {
            return Err(format!("{hook} hook registration rejected").into());
        }
        let id = inner.next_id;
        inner.next_id += 1;
        Ok(id)
    }

    fn deregister_fn(&self, hook: HookKind, id: u64) -> DeregisterFn {
        let weak: Weak<Mutex<RouterState<S>>> = Arc::downgrade(&self.inner);
        Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut inner = lock(&inner);
            match hook {
                HookKind::TransitionStart => inner.start_hooks.retain(|(hid, _)| *hid != id),
                HookKind::StatesChanged => inner.states_hooks.retain(|(hid, _)| *hid != id),
            }
        })
    }
}

impl<S: Message + Clone + PartialEq> MockRouter<S> {
    /// Remove `states` from the registry and notify states-changed hooks.
    ///
    /// Only declarations actually present are removed and reported.
    pub fn deregister(&self, states: Vec<S>) {
        let (removed, hooks) = {
            let mut inner = lock(&self.inner);
            let removed: Vec<S> = states
                .into_iter()
                .filter(|s| inner.states.contains(s))
                .collect();
            inner.states.retain(|s| !removed.contains(s));
            (removed, Self::states_hooks(&inner))
        };
        if removed.is_empty() {
            return;
        }
        for hook in hooks {
            hook(StatesChangedKind::Deregistered, &removed);
        }
    }
}

impl<S: Message + Clone> Default for MockRouter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Message + Clone> Router for MockRouter<S> {
    type Transition = MockTransition;
    type State = S;

    fn on_start(&self, hook: StartHook<MockTransition>) -> Result<DeregisterFn, BoxError> {
        let id = self.check_registration(HookKind::TransitionStart)?;
        lock(&self.inner).start_hooks.push((id, Arc::from(hook)));
        Ok(self.deregister_fn(HookKind::TransitionStart, id))
    }

    fn on_states_changed(&self, hook: StatesChangedHook<S>) -> Result<DeregisterFn, BoxError> {
        let id = self.check_registration(HookKind::StatesChanged)?;
        lock(&self.inner).states_hooks.push((id, Arc::from(hook)));
        Ok(self.deregister_fn(HookKind::StatesChanged, id))
    }

    fn current_states(&self) -> Vec<S> {
        lock(&self.inner).states.clone()
    }
}
