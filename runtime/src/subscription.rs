//! Observer registration for the Store.
//!
//! Observers are zero-argument callbacks invoked after every dispatch. Each
//! registration gets its own [`SubscriptionId`], so the same callback can be
//! registered several times and each registration removed independently.

use crate::lock;
use crate::metrics::SUBSCRIPTIONS_ACTIVE;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// A registered observer callback
pub(crate) type Observer = Arc<dyn Fn() + Send + Sync>;

/// Identifier of one observer registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Registration-ordered observer list shared by all clones of a Store
#[derive(Default)]
pub(crate) struct Observers {
    entries: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_id: AtomicU64,
}

impl Observers {
    /// Append an observer and return the handle that removes it
    pub(crate) fn register(self: &Arc<Self>, observer: Observer) -> Subscription {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let active = {
            let mut entries = lock(&self.entries);
            entries.push((id, observer));
            entries.len()
        };
        record_active(active);
        tracing::debug!(subscription = %id, active, "Observer subscribed");

        Subscription {
            id,
            registry: Arc::downgrade(self),
        }
    }

    /// Observers registered right now, in registration order
    ///
    /// The lock is released before the caller invokes anything, so observers
    /// may subscribe or unsubscribe while being notified. Changes take effect
    /// from the next dispatch.
    pub(crate) fn snapshot(&self) -> SmallVec<[Observer; 4]> {
        lock(&self.entries)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let (removed, active) = {
            let mut entries = lock(&self.entries);
            let before = entries.len();
            entries.retain(|(entry, _)| *entry != id);
            (entries.len() < before, entries.len())
        };
        if removed {
            record_active(active);
            tracing::debug!(subscription = %id, active, "Observer unsubscribed");
        }
        removed
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.len())
            .finish_non_exhaustive()
    }
}

// Precision loss acceptable for a gauge (observer counts < 2^52)
#[allow(clippy::cast_precision_loss)]
fn record_active(active: usize) {
    metrics::gauge!(SUBSCRIPTIONS_ACTIVE).set(active as f64);
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe)
///
/// Dropping the handle does **not** unsubscribe; call
/// [`Subscription::unsubscribe`] to remove the observer.
#[derive(Debug)]
#[must_use = "dropping a Subscription keeps the observer registered; \
              call `unsubscribe` to remove it"]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<Observers>,
}

impl Subscription {
    /// Identifier of this registration
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove this registration from the Store
    ///
    /// Returns `false` if the Store no longer exists or the registration was
    /// already gone.
    pub fn unsubscribe(self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|observers| observers.remove(self.id))
    }
}
