//! Listener sets with cancelable subscriptions.
//!
//! `subscribe` returns a [`Subscription`]; cancelling it (explicitly or by
//! dropping it) removes the callback. Cancellation is idempotent, and a
//! cancelled callback is never invoked again, even if an emit is in flight on
//! another thread when it is cancelled.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

trait Unsubscribe: Send + Sync {
    fn remove(&self, id: u64);
}

struct ListenerSet<T> {
    next_id: AtomicU64,
    callbacks: DashMap<u64, Callback<T>>,
}

impl<T> Unsubscribe for ListenerSet<T> {
    fn remove(&self, id: u64) {
        self.callbacks.remove(&id);
    }
}

/// A set of callbacks receiving `&T`.
pub struct Listeners<T> {
    set: Arc<ListenerSet<T>>,
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            set: Arc::new(ListenerSet {
                next_id: AtomicU64::new(1),
                callbacks: DashMap::new(),
            }),
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.set.next_id.fetch_add(1, Ordering::Relaxed);
        self.set.callbacks.insert(id, Arc::new(f));

        let set: Arc<dyn Unsubscribe> = self.set.clone();
        Subscription {
            id,
            set: Arc::downgrade(&set),
            active: AtomicBool::new(true),
        }
    }

    /// Invoke every live callback in registration order.
    ///
    /// No map lock is held while a callback runs, so callbacks may subscribe
    /// or cancel freely.
    pub fn emit(&self, value: &T) {
        let mut snapshot: Vec<(u64, Callback<T>)> = self
            .set
            .callbacks
            .iter()
            .map(|e| (*e.key(), Arc::clone(e.value())))
            .collect();
        snapshot.sort_by_key(|(id, _)| *id);

        for (id, cb) in snapshot {
            if self.set.callbacks.contains_key(&id) {
                cb(value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.set.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.callbacks.is_empty()
    }
}

/// Handle for one registered callback. Dropping it cancels the callback.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    id: u64,
    set: Weak<dyn Unsubscribe>,
    active: AtomicBool,
}

impl Subscription {
    /// Stop delivery. Safe to call any number of times.
    pub fn cancel(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            if let Some(set) = self.set.upgrade() {
                set.remove(self.id);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
