//! Notifications the sync layer subscribes to.
//!
//! The registry is an explicit object handed to whoever needs it, not a
//! module-level singleton: subscriptions have an id, unsubscription is a
//! first-class operation, and a test can build its own registry in isolation.

use std::sync::{Arc, Mutex};

/// Feed lifecycle events emitted by the group façade after a successful
/// mutation RPC. Convention has the variant name lead with what changed.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedEvent {
    MemberJoined { feed_id: String, address: String },
    MembershipRevoked { feed_id: String, address: String },
    SettingsChanged { feed_id: String },
    VisibilityChanged { feed_id: String, is_public: bool },
}

impl FeedEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            FeedEvent::MemberJoined { .. } => EventKind::MemberJoined,
            FeedEvent::MembershipRevoked { .. } => EventKind::MembershipRevoked,
            FeedEvent::SettingsChanged { .. } => EventKind::SettingsChanged,
            FeedEvent::VisibilityChanged { .. } => EventKind::VisibilityChanged,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    MemberJoined,
    MembershipRevoked,
    SettingsChanged,
    VisibilityChanged,
}

pub type SubscriptionId = u64;

type Callback = Arc<dyn Fn(&FeedEvent) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    callback: Callback,
}

pub struct EventRegistry {
    inner: Mutex<RegistryInner>,
}

struct RegistryInner {
    next_id: SubscriptionId,
    subscriptions: Vec<Subscription>,
}

impl EventRegistry {
    pub fn new() -> Self {
        EventRegistry {
            inner: Mutex::new(RegistryInner {
                next_id: 1,
                subscriptions: vec![],
            }),
        }
    }

    /// Registers a callback for one event kind and returns its id.
    pub fn subscribe(
        &self,
        kind: EventKind,
        callback: impl Fn(&FeedEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut inner = self.inner.lock().expect("event registry poisoned");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscriptions.push(Subscription {
            id,
            kind,
            callback: Arc::new(callback),
        });
        id
    }

    /// Removes a subscription; returns false if the id was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock().expect("event registry poisoned");
        let before = inner.subscriptions.len();
        inner.subscriptions.retain(|subscription| subscription.id != id);
        inner.subscriptions.len() != before
    }

    /// Delivers `event` to every matching subscriber.
    ///
    /// Callbacks run outside the registry lock, so a callback may subscribe
    /// or unsubscribe without deadlocking.
    pub fn notify(&self, event: &FeedEvent) {
        let callbacks: Vec<Callback> = {
            let inner = self.inner.lock().expect("event registry poisoned");
            inner
                .subscriptions
                .iter()
                .filter(|subscription| subscription.kind == event.kind())
                .map(|subscription| Arc::clone(&subscription.callback))
                .collect()
        };
        for callback in callbacks {
            callback(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .expect("event registry poisoned")
            .subscriptions
            .len()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        EventRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_subscribe_and_notify() {
        let registry = EventRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_callback = Arc::clone(&hits);
        registry.subscribe(EventKind::MemberJoined, move |event| {
            assert!(matches!(event, FeedEvent::MemberJoined { .. }));
            hits_in_callback.fetch_add(1, Ordering::SeqCst);
        });

        registry.notify(&FeedEvent::MemberJoined {
            feed_id: "feed-1".to_string(),
            address: "hush1abc".to_string(),
        });
        // wrong kind, must not be delivered
        registry.notify(&FeedEvent::SettingsChanged {
            feed_id: "feed-1".to_string(),
        });
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let registry = EventRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_callback = Arc::clone(&hits);
        let id = registry.subscribe(EventKind::VisibilityChanged, move |_| {
            hits_in_callback.fetch_add(1, Ordering::SeqCst);
        });

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        registry.notify(&FeedEvent::VisibilityChanged {
            feed_id: "feed-1".to_string(),
            is_public: true,
        });
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn test_callback_may_unsubscribe_itself() {
        let registry = Arc::new(EventRegistry::new());
        let registry_in_callback = Arc::clone(&registry);
        let id = Arc::new(Mutex::new(0u64));
        let id_in_callback = Arc::clone(&id);
        *id.lock().unwrap() = registry.subscribe(EventKind::SettingsChanged, move |_| {
            registry_in_callback.unsubscribe(*id_in_callback.lock().unwrap());
        });

        registry.notify(&FeedEvent::SettingsChanged {
            feed_id: "feed-9".to_string(),
        });
        assert_eq!(registry.subscriber_count(), 0);
    }
}
