//! State Machine Runtime
//!
//! Small flat state machines for controller interaction states (menu
//! open/closed and the like). Events with no transition out of the
//! current state are ignored.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Marker for types usable as states or events
pub trait FsmKey: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> FsmKey for T {}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: FxHashMap<(S, E), S>,
}

impl<S: FsmKey, E: FsmKey> StateMachineBuilder<S, E> {
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: FxHashMap::default(),
        }
    }

    /// Add a transition (from, event, to). A later one for the same pair wins.
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.insert((from, event), to);
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
        }
    }
}

/// A state machine instance
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: FxHashMap<(S, E), S>,
}

impl<S: FsmKey, E: FsmKey> StateMachine<S, E> {
    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Send an event to the state machine, potentially triggering a transition.
    ///
    /// Returns the state after handling the event.
    pub fn send(&mut self, event: E) -> S {
        let current = self.current_state;
        match self.transitions.get(&(current, event)) {
            Some(&to_state) => {
                tracing::trace!("fsm: {:?} --{:?}--> {:?}", current, event, to_state);
                self.current_state = to_state;
                to_state
            }
            None => {
                tracing::trace!("fsm: {:?} ignored in {:?}", event, current);
                current
            }
        }
    }
}
