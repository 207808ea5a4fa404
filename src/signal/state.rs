//! State namespace - the application's name → Signal registry.
//!
//! Built by application code before tree construction and handed to
//! [`mount`](crate::pipeline::mount). The binding resolver only reads it;
//! the signals inside stay mutable through `set`.

use indexmap::IndexMap;

use crate::engine::PropValue;

use super::Signal;

/// Signal type stored in the namespace.
pub type StateSignal = Signal<PropValue>;

/// Ordered registry of named state signals.
#[derive(Debug, Default, Clone)]
pub struct StateNamespace {
    signals: IndexMap<String, StateSignal>,
}

impl StateNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing signal under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, signal: StateSignal) -> Option<StateSignal> {
        self.signals.insert(name.into(), signal)
    }

    /// Create a signal with `initial`, register it, and return a handle to it.
    pub fn signal(&mut self, name: impl Into<String>, initial: impl Into<PropValue>) -> StateSignal {
        let signal = Signal::new(initial.into());
        self.signals.insert(name.into(), signal.clone());
        signal
    }

    pub fn get(&self, name: &str) -> Option<&StateSignal> {
        self.signals.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.signals.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateSignal)> {
        self.signals.iter().map(|(name, signal)| (name.as_str(), signal))
    }
}
