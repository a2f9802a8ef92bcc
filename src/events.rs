//! Typed publish/subscribe registries for change notifications.
//!
//! Each engine owns one `Subscribers` per notification channel; subscribers
//! are an explicit list of boxed callbacks rather than an ambient signal
//! mechanism. Notifications carry the full current ordered list (not deltas)
//! so renderers can stay stateless.
//!
//! Callbacks run on the thread performing the mutation. Emits may nest (a
//! callback can trigger another mutation, e.g. a bound change truncating a
//! collection), so dispatch holds a recursive read lock. Do not subscribe or
//! unsubscribe from inside a callback.

use parking_lot::RwLock;

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Explicit subscriber registry for one notification channel.
pub struct Subscribers<T> {
    inner: RwLock<Inner<T>>,
}

struct Inner<T> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Subscribers {
            inner: RwLock::new(Inner {
                next_id: 0,
                entries: Vec::new(),
            }),
        }
    }

    /// Register a callback; it will be invoked for every subsequent `emit`.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.inner.write();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a previously registered callback. Returns false if the id is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.write();
        let before = inner.entries.len();
        inner.entries.retain(|(entry_id, _)| *entry_id != id);
        inner.entries.len() != before
    }

    /// Invoke all callbacks with the payload, in registration order.
    pub fn emit(&self, payload: &T) {
        // read_recursive: a callback may mutate state that emits again
        let inner = self.inner.read_recursive();
        for (_, callback) in &inner.entries {
            callback(payload);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}
