//! Payload-less change notification.
//!
//! A [`Signal`] is an explicit observer list owned by whoever emits it. The
//! document owns one and fires it once after every successful edit batch so
//! a rendering layer can resynchronize. Observers run synchronously, in
//! registration order, on the thread that performed the edit.

use std::fmt;

/// Handle returned by [`Signal::connect`], used to disconnect later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// An ordered list of `FnMut()` observers.
#[derive(Default)]
pub struct Signal {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn FnMut()>)>,
}

impl Signal {
    /// A signal with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. It stays connected until [`disconnect`](Self::disconnect).
    pub fn connect(&mut self, observer: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if `id` was not connected.
    pub fn disconnect(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Number of connected observers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// True when nobody is listening.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Call every observer once, in registration order.
    pub fn emit(&mut self) {
        tracing::trace!(observers = self.observers.len(), "emit");
        for (_, observer) in &mut self.observers {
            observer();
        }
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("observers", &self.observers.len())
            .finish()
    }
}
