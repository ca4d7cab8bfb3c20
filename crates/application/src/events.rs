//! Named-event publish/subscribe registry

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Event published when the session authorization status changes.
///
/// The payload is the new status as a JSON string.
pub const AUTH_STATUS_CHANGE: &str = "auth:statusChange";

/// Callback signature for event subscribers.
pub type EventCallback = dyn Fn(&Value) + Send + Sync;

/// Handle identifying a single subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

struct Subscriber {
    id: SubscriptionId,
    callback: Arc<EventCallback>,
}

/// Registry of named events with ordered, synchronous dispatch.
///
/// Subscribers run on the publishing thread in subscription order, so a
/// slow subscriber delays the publish call and everything queued after it.
/// The registry lock is released before callbacks run; a callback may
/// subscribe or unsubscribe without deadlocking, and registrations made
/// during a publish take effect from the next publish on.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<HashMap<String, Vec<Subscriber>>>,
}

impl EventBus {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for `event`, after any earlier registrations.
    ///
    /// The same callback may be registered more than once; it then runs
    /// once per registration.
    pub fn subscribe(
        &self,
        event: impl Into<String>,
        callback: impl Fn(&Value) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        let subscriber = Subscriber {
            id,
            callback: Arc::new(callback),
        };
        self.lock().entry(event.into()).or_default().push(subscriber);
        id
    }

    /// Removes the registration identified by `id` for `event`.
    ///
    /// Unknown events and ids are silently ignored.
    pub fn unsubscribe(&self, event: &str, id: SubscriptionId) {
        let mut subscribers = self.lock();
        if let Some(list) = subscribers.get_mut(event) {
            list.retain(|subscriber| subscriber.id != id);
            if list.is_empty() {
                subscribers.remove(event);
            }
        }
    }

    /// Removes every registration for `event`.
    pub fn unsubscribe_all(&self, event: &str) {
        self.lock().remove(event);
    }

    /// Invokes every subscriber of `event` in subscription order.
    ///
    /// Dispatch is synchronous on the calling thread. Publishing an event
    /// nobody subscribed to does nothing.
    pub fn publish(&self, event: &str, payload: &Value) {
        let callbacks: Vec<Arc<EventCallback>> = self.lock().get(event).map_or_else(Vec::new, |list| {
            list.iter()
                .map(|subscriber| Arc::clone(&subscriber.callback))
                .collect()
        });
        for callback in callbacks {
            callback(payload);
        }
    }

    /// Number of live registrations for `event`.
    #[must_use]
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.lock().get(event).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Subscriber>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&Value) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback = move |payload: &Value| {
            sink.lock().unwrap().push(payload.to_string());
        };
        (seen, callback)
    }

    #[test]
    fn test_publish_reaches_subscriber() {
        let bus = EventBus::new();
        let (seen, callback) = recorder();
        bus.subscribe("sync:done", callback);

        bus.publish("sync:done", &json!("ok"));

        assert_eq!(seen.lock().unwrap().as_slice(), [r#""ok""#]);
    }

    #[test]
    fn test_subscribers_run_in_subscription_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for label in ["first", "second", "third"] {
            let sink = Arc::clone(&seen);
            bus.subscribe("ordered", move |_payload: &Value| {
                sink.lock().unwrap().push(label);
            });
        }

        bus.publish("ordered", &Value::Null);

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["first", "second", "third"]
        );
    }

    #[test]
    fn test_events_are_isolated() {
        let bus = EventBus::new();
        let (seen, callback) = recorder();
        bus.subscribe("one", callback);

        bus.publish("two", &json!(1));

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsubscribe_removes_only_that_registration() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let first = bus.subscribe("e", move |_: &Value| {
            sink.lock().unwrap().push("a");
        });
        let sink = Arc::clone(&seen);
        bus.subscribe("e", move |_: &Value| {
            sink.lock().unwrap().push("b");
        });

        bus.unsubscribe("e", first);
        bus.publish("e", &Value::Null);

        assert_eq!(seen.lock().unwrap().as_slice(), ["b"]);
        assert_eq!(bus.subscriber_count("e"), 1);
    }

    #[test]
    fn test_unsubscribe_unknown_is_silent() {
        let bus = EventBus::new();
        let id = bus.subscribe("known", |_: &Value| {});

        bus.unsubscribe("unknown", id);
        bus.unsubscribe_all("also-unknown");

        assert_eq!(bus.subscriber_count("known"), 1);
    }

    #[test]
    fn test_unsubscribe_all_clears_event() {
        let bus = EventBus::new();
        let (seen, callback) = recorder();
        bus.subscribe("e", callback);
        bus.subscribe("e", |_: &Value| {});

        bus.unsubscribe_all("e");
        bus.publish("e", &json!("dropped"));

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(bus.subscriber_count("e"), 0);
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let bus = EventBus::new();
        bus.publish("nobody", &json!({"fine": true}));
    }

    #[test]
    fn test_duplicate_registration_runs_twice() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for _ in 0..2 {
            let sink = Arc::clone(&seen);
            bus.subscribe("dup", move |_: &Value| {
                sink.lock().unwrap().push(());
            });
        }

        bus.publish("dup", &Value::Null);

        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_callback_may_subscribe_during_publish() {
        let bus = Arc::new(EventBus::new());
        let reentrant = Arc::clone(&bus);
        bus.subscribe("boot", move |_: &Value| {
            reentrant.subscribe("boot", |_: &Value| {});
        });

        bus.publish("boot", &Value::Null);

        // The nested registration lands but only runs from the next publish.
        assert_eq!(bus.subscriber_count("boot"), 2);
    }
}
