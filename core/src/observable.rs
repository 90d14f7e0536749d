//! Observable value container for UI-facing state.
//!
//! # Design
//! Backed by `tokio::sync::watch`: there is always a current value, new
//! subscribers start from it, and readers never block writers. Only the
//! owning controller writes.

use tokio::sync::watch;

/// A hot, replay-latest value.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            tx: watch::Sender::new(initial),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Receiver positioned at the current value; `changed()` resolves on
    /// the next write.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Replace the value and wake subscribers, even when nobody listens.
    pub(crate) fn set(&self, value: T) {
        self.tx.send_replace(value);
    }
}
