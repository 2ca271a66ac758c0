//! Typed change-notification channel.
//!
//! Synchronous fan-out in subscription order, on the caller's stack. The
//! whole crate assumes the single-threaded GUI event loop of the owning
//! application, so there is no locking and no `Send` bound on subscribers.

/// Handle returned by [`EventSource::subscribe`], used to unsubscribe.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription(u64);

pub struct EventSource<E> {
    next_id: u64,
    subscribers: Vec<(u64, Box<dyn FnMut(&E)>)>,
}

impl<E> EventSource<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&E) + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        Subscription(id)
    }

    /// Returns false if the handle was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(id, _)| *id != subscription.0);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E> Default for EventSource<E> {
    fn default() -> Self {
        Self::new()
    }
}
