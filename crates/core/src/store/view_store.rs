use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;

use super::{StoreObserver, ViewField};

/// Handle returned by [`ViewStore::observe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Mutable state of one mounted view plus the observers watching it.
///
/// The state lock is only ever held for the duration of a read or write
/// closure. It is never held across an `.await` or while observers run.
pub struct ViewStore<S> {
    state: Mutex<S>,
    observers: Mutex<Vec<(SubscriptionId, Arc<dyn StoreObserver>)>>,
    next_id: AtomicU64,
    destroyed: AtomicBool,
}

impl<S> ViewStore<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: Mutex::new(initial),
            observers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            destroyed: AtomicBool::new(false),
        }
    }

    /// Registers `observer` for notification on every emitted batch.
    pub fn observe(&self, observer: Arc<dyn StoreObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if self.is_destroyed() {
            debug!("Ignoring observer registration on a destroyed store");
            return id;
        }
        self.lock_observers().push((id, observer));
        id
    }

    /// Removes a previously registered observer. Returns false if unknown.
    pub fn unobserve(&self, id: SubscriptionId) -> bool {
        let mut observers = self.lock_observers();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.lock_observers().len()
    }

    /// Runs `f` against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock_state())
    }

    /// Opens a write batch. Observers are notified once when the collector
    /// is emitted or dropped.
    pub fn collect(&self) -> Collector<'_, S> {
        Collector {
            store: self,
            changed: Vec::new(),
        }
    }

    /// Applies a single write and emits it immediately.
    pub fn write(&self, field: ViewField, f: impl FnOnce(&mut S)) -> bool {
        let mut collector = self.collect();
        let applied = collector.write(field, f);
        collector.emit();
        applied
    }

    /// Drops every observer and rejects all further writes.
    pub fn destroy(&self) {
        if !self.destroyed.swap(true, Ordering::SeqCst) {
            self.lock_observers().clear();
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    fn notify(&self, fields: &[ViewField]) {
        if fields.is_empty() || self.is_destroyed() {
            return;
        }
        let observers: Vec<Arc<dyn StoreObserver>> = self
            .lock_observers()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            observer.on_change(fields);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, S> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Arc<dyn StoreObserver>)>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A batch of writes against a [`ViewStore`].
///
/// Dropping a collector without calling [`Collector::emit`] still notifies,
/// so no applied write goes unannounced.
pub struct Collector<'a, S> {
    store: &'a ViewStore<S>,
    changed: Vec<ViewField>,
}

impl<S> Collector<'_, S> {
    /// Applies `f` to the state and records `field` as changed.
    ///
    /// Returns false, without running `f`, once the store is destroyed.
    pub fn write(&mut self, field: ViewField, f: impl FnOnce(&mut S)) -> bool {
        self.write_if(field, |state| {
            f(state);
            true
        })
    }

    /// Applies `f` to the state, recording `field` only when `f` reports a
    /// change. Returns what `f` returned, or false once the store is
    /// destroyed.
    pub fn write_if(&mut self, field: ViewField, f: impl FnOnce(&mut S) -> bool) -> bool {
        if self.store.is_destroyed() {
            debug!("Discarding write to {} after teardown", field.as_str());
            return false;
        }
        let changed = f(&mut self.store.lock_state());
        if changed && !self.changed.contains(&field) {
            self.changed.push(field);
        }
        changed
    }

    /// Runs `f` against the current state, including writes already applied
    /// by this collector.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.store.read(f)
    }

    /// Notifies observers once with every field written in this batch.
    pub fn emit(mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        let changed = std::mem::take(&mut self.changed);
        self.store.notify(&changed);
    }
}

impl<S> Drop for Collector<'_, S> {
    fn drop(&mut self) {
        self.flush();
    }
}
