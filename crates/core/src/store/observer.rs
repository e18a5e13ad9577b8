//! Store observer trait and implementations.

use std::sync::{Arc, Mutex};

use super::ViewField;

/// Trait for receiving store change notifications.
///
/// A renderer registers one observer per mounted view and re-reads the
/// view's props when notified.
///
/// # Design Rules
///
/// - `on_change()` runs synchronously on the writer's thread; keep it fast
/// - The store's state lock is released before observers run, so reading
///   the view from inside `on_change()` is allowed
/// - One call per emitted batch, never one per field write
pub trait StoreObserver: Send + Sync {
    /// Called once per emitted batch with the distinct fields that changed.
    fn on_change(&self, fields: &[ViewField]);
}

impl<F> StoreObserver for F
where
    F: Fn(&[ViewField]) + Send + Sync,
{
    fn on_change(&self, fields: &[ViewField]) {
        self(fields)
    }
}

/// No-op implementation for contexts that don't render.
#[derive(Clone, Default)]
pub struct NoOpStoreObserver;

impl StoreObserver for NoOpStoreObserver {
    fn on_change(&self, _fields: &[ViewField]) {
        // Intentionally empty - notifications are discarded
    }
}

/// Mock observer for testing - records every notification batch.
#[derive(Clone, Default)]
pub struct MockStoreObserver {
    batches: Arc<Mutex<Vec<Vec<ViewField>>>>,
}

impl MockStoreObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded batches, oldest first.
    pub fn batches(&self) -> Vec<Vec<ViewField>> {
        self.batches.lock().unwrap().clone()
    }

    /// Returns the number of notifications received.
    pub fn len(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    /// Returns true if no notification has been received.
    pub fn is_empty(&self) -> bool {
        self.batches.lock().unwrap().is_empty()
    }

    /// Returns true if any batch mentioned `field`.
    pub fn saw(&self, field: ViewField) -> bool {
        self.batches
            .lock()
            .unwrap()
            .iter()
            .any(|batch| batch.contains(&field))
    }

    /// Clears recorded batches.
    pub fn clear(&self) {
        self.batches.lock().unwrap().clear();
    }
}

impl StoreObserver for MockStoreObserver {
    fn on_change(&self, fields: &[ViewField]) {
        self.batches.lock().unwrap().push(fields.to_vec());
    }
}
