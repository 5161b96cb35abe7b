#![forbid(unsafe_code)]

//! Reorder notification.
//!
//! A completed drag produces at most one [`ReorderEvent`]. Observers register
//! a callback (or take a channel receiver) on the list; there is no bubbling
//! event substrate.

use std::fmt;
use std::sync::mpsc;

/// Name of the reorder event for hosts that re-dispatch it as a DOM event.
pub const REORDER_EVENT_NAME: &str = "sortable-list-reorder";

/// An item moved from index `from` to index `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReorderEvent {
    pub from: usize,
    pub to: usize,
}

impl ReorderEvent {
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for ReorderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ from: {}, to: {} }}", REORDER_EVENT_NAME, self.from, self.to)
    }
}

/// Handle returned by [`ReorderNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

enum Observer {
    Callback(Box<dyn FnMut(&ReorderEvent)>),
    Channel(mpsc::Sender<ReorderEvent>),
}

impl Observer {
    /// Deliver `event`. Returns `false` once the observer can no longer
    /// receive anything.
    fn deliver(&mut self, event: &ReorderEvent) -> bool {
        match self {
            Self::Callback(callback) => {
                callback(event);
                true
            }
            Self::Channel(tx) => tx.send(*event).is_ok(),
        }
    }
}

/// Fan-out of reorder events to registered observers.
#[derive(Default)]
pub struct ReorderNotifier {
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl fmt::Debug for ReorderNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReorderNotifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ReorderNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers run in registration order.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ReorderEvent) + 'static,
    {
        self.register(Observer::Callback(Box::new(observer)))
    }

    /// Register a channel observer and return its receiving end. Once the
    /// receiver is dropped the observer is pruned on the next delivery.
    pub fn subscribe_channel(&mut self) -> (SubscriptionId, mpsc::Receiver<ReorderEvent>) {
        let (tx, rx) = mpsc::channel();
        let id = self.register(Observer::Channel(tx));
        (id, rx)
    }

    fn register(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver a reorder from `from` to `to`. Equal indices are a no-op drop:
    /// nothing is delivered and `None` is returned.
    pub fn notify(&mut self, from: usize, to: usize) -> Option<ReorderEvent> {
        if from == to {
            return None;
        }
        let event = ReorderEvent::new(from, to);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            from,
            to,
            observers = self.observers.len(),
            "sortable reorder emitted"
        );
        self.observers
            .retain_mut(|(_, observer)| observer.deliver(&event));
        Some(event)
    }
}
