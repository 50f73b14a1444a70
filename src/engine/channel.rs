//! Replay-last publish/subscribe channel for display strings.
//!
//! A [`Channel`] always holds a latest value. Subscribing delivers that value
//! immediately, and every later [`Channel::publish`] reaches all current
//! subscribers synchronously, in subscription order.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Callback invoked with each published value.
pub type Subscriber = Box<dyn FnMut(&str) + Send>;

/// Handle returned by [`Channel::subscribe`], unique across all channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn next() -> Self {
        Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Push-style string channel with replay of the latest value.
///
/// # Example
///
/// ```rust
/// use keypad_calc::engine::Channel;
/// use std::sync::{Arc, Mutex};
///
/// let mut channel = Channel::new("result", "0".to_string());
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&seen);
/// channel.subscribe(move |value| sink.lock().unwrap().push(value.to_string()));
/// channel.publish("42".to_string());
///
/// assert_eq!(*seen.lock().unwrap(), vec!["0", "42"]);
/// ```
pub struct Channel {
    name: &'static str,
    latest: String,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl Channel {
    /// Creates a channel whose first replayed value is `initial`.
    #[must_use]
    pub const fn new(name: &'static str, initial: String) -> Self {
        Self {
            name,
            latest: initial,
            subscribers: Vec::new(),
        }
    }

    /// Last published value.
    #[must_use]
    pub fn latest(&self) -> &str {
        &self.latest
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Registers `subscriber` and immediately hands it the latest value.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&str) + Send + 'static,
    {
        let id = SubscriptionId::next();
        let mut subscriber: Subscriber = Box::new(subscriber);
        subscriber(&self.latest);
        self.subscribers.push((id, subscriber));
        tracing::trace!(channel = self.name, ?id, "subscriber added");
        id
    }

    /// Removes a subscriber. Returns `false` if `id` is not registered here.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        before != self.subscribers.len()
    }

    /// Stores `value` as the latest value and delivers it to every subscriber.
    pub fn publish(&mut self, value: String) {
        self.latest = value;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.latest);
        }
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("latest", &self.latest)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder(channel: &mut Channel) -> (SubscriptionId, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = channel.subscribe(move |value| sink.lock().unwrap().push(value.to_string()));
        (id, seen)
    }

    #[test]
    fn late_subscribers_get_the_latest_value_only() {
        let mut channel = Channel::new("process", "1".to_string());
        channel.publish("2".to_string());
        channel.publish("3".to_string());

        let (_, seen) = recorder(&mut channel);
        assert_eq!(*seen.lock().unwrap(), vec!["3"]);
    }

    #[test]
    fn unsubscribed_callbacks_stop_receiving() {
        let mut channel = Channel::new("result", "0".to_string());
        let (id, seen) = recorder(&mut channel);
        let (_, other) = recorder(&mut channel);

        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.publish("7".to_string());

        assert_eq!(*seen.lock().unwrap(), vec!["0"]);
        assert_eq!(*other.lock().unwrap(), vec!["0", "7"]);
        assert_eq!(channel.subscriber_count(), 1);
    }

    #[test]
    fn ids_are_unique_across_channels() {
        let mut a = Channel::new("a", String::new());
        let mut b = Channel::new("b", String::new());
        let (id_a, _) = recorder(&mut a);
        let (id_b, _) = recorder(&mut b);
        assert_ne!(id_a, id_b);
        assert!(!b.unsubscribe(id_a));
    }
}
