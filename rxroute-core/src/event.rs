//! State registry change events.

use crate::router::StatesChangedKind;

/// A snapshot of the state registry together with what just changed.
///
/// `current_states` is always the full registry at notification time. At
/// most one of `registered` / `deregistered` is non-empty; the initial
/// snapshot event leaves both empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatesChangedEvent<S> {
    /// Every declaration currently in the registry.
    pub current_states: Vec<S>,
    /// Declarations added by this change.
    pub registered: Vec<S>,
    /// Declarations removed by this change.
    pub deregistered: Vec<S>,
}

impl<S> StatesChangedEvent<S> {
    /// A baseline event carrying only the registry contents.
    pub fn snapshot(current_states: Vec<S>) -> Self {
        Self {
            current_states,
            registered: Vec::new(),
            deregistered: Vec::new(),
        }
    }

    /// An event for a single registry change.
    pub fn changed(kind: StatesChangedKind, states: Vec<S>, current_states: Vec<S>) -> Self {
        let mut event = Self::snapshot(current_states);
        match kind {
            StatesChangedKind::Registered => event.registered = states,
            StatesChangedKind::Deregistered => event.deregistered = states,
        }
        event
    }

    /// The change kind, or `None` for a snapshot event.
    pub fn kind(&self) -> Option<StatesChangedKind> {
        if !self.registered.is_empty() {
            Some(StatesChangedKind::Registered)
        } else if !self.deregistered.is_empty() {
            Some(StatesChangedKind::Deregistered)
        } else {
            None
        }
    }
}

impl<S> Default for StatesChangedEvent<S> {
    fn default() -> Self {
        Self::snapshot(Vec::new())
    }
}
