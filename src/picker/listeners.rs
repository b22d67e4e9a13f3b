//! Subscription lists for picker notifications.

use std::fmt;

/// Callbacks run synchronously, in subscription order, on every emit.
pub struct Listeners<T> {
    callbacks: Vec<Box<dyn FnMut(&T)>>,
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self { callbacks: Vec::new() }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn emit(&mut self, value: &T) {
        for callback in &mut self.callbacks {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listeners({})", self.callbacks.len())
    }
}

/// Direction a bounded value wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    /// Wrapped from the maximum to the minimum
    Up,
    /// Wrapped from the minimum to the maximum
    Down,
}

/// What a single key press or step did to a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome<T> {
    pub result: super::KeyResult,
    /// New value, when the selection was set
    pub changed: Option<T>,
    /// Set when the step wrapped around a bound
    pub rollover: Option<Rollover>,
}

impl<T> Outcome<T> {
    pub fn consumed() -> Self {
        Self { result: super::KeyResult::Consumed, changed: None, rollover: None }
    }

    pub fn not_consumed() -> Self {
        Self { result: super::KeyResult::NotConsumed, changed: None, rollover: None }
    }

    pub fn changed(value: T) -> Self {
        Self { result: super::KeyResult::Consumed, changed: Some(value), rollover: None }
    }

    pub fn with_rollover(mut self, rollover: Option<Rollover>) -> Self {
        self.rollover = rollover;
        self
    }
}
