//! Binds spawned fetch tasks to the lifetime of a mounted view.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::errors::{Error, Result};

/// Cheap, cloneable "is the view still mounted" check handed to tasks.
#[derive(Clone, Debug)]
pub struct MountGuard {
    open: Arc<AtomicBool>,
}

impl MountGuard {
    pub fn is_mounted(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

/// Owns the tasks a view spawned while mounted.
///
/// Closing the lifetime flips every [`MountGuard`] to unmounted and aborts
/// the tasks still in flight. A completion that already got past its await
/// point must re-check its guard before writing.
pub struct ViewLifetime {
    open: Arc<AtomicBool>,
    tasks: Mutex<Vec<AbortHandle>>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self {
            open: Arc::new(AtomicBool::new(true)),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn guard(&self) -> MountGuard {
        MountGuard {
            open: self.open.clone(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Spawns `future` on the current tokio runtime, bound to this lifetime.
    pub fn spawn<F>(&self, future: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if !self.is_open() {
            return Err(Error::ViewClosed);
        }
        let handle = Handle::try_current().map_err(|e| Error::Runtime(e.to_string()))?;
        let task = handle.spawn(future);

        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|t| !t.is_finished());
        tasks.push(task.abort_handle());
        Ok(())
    }

    /// Number of spawned tasks that have not finished yet.
    pub fn active_tasks(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| !t.is_finished())
            .count()
    }

    /// Marks the view unmounted and aborts in-flight tasks. Idempotent.
    pub fn close(&self) {
        if !self.open.swap(false, Ordering::SeqCst) {
            return;
        }
        let tasks = std::mem::take(&mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner));
        let in_flight = tasks.iter().filter(|t| !t.is_finished()).count();
        for task in tasks {
            task.abort();
        }
        if in_flight > 0 {
            debug!("Aborted {} in-flight view task(s)", in_flight);
        }
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewLifetime {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_spawned_task_runs_to_completion() {
        let lifetime = ViewLifetime::new();
        let done = Arc::new(Notify::new());
        let signal = done.clone();

        lifetime
            .spawn(async move {
                signal.notify_one();
            })
            .unwrap();

        done.notified().await;
        assert!(lifetime.is_open());
    }

    #[tokio::test]
    async fn test_close_aborts_pending_tasks() {
        let lifetime = ViewLifetime::new();
        let guard = lifetime.guard();
        let gate = Arc::new(Notify::new());
        let completed = Arc::new(AtomicUsize::new(0));

        let wait_on = gate.clone();
        let counter = completed.clone();
        lifetime
            .spawn(async move {
                wait_on.notified().await;
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        assert_eq!(lifetime.active_tasks(), 1);

        lifetime.close();
        assert!(!guard.is_mounted());
        gate.notify_waiters();
        tokio::task::yield_now().await;

        assert_eq!(completed.load(Ordering::SeqCst), 0);
        assert_eq!(lifetime.active_tasks(), 0);
    }

    #[tokio::test]
    async fn test_spawn_after_close_is_rejected() {
        let lifetime = ViewLifetime::new();
        lifetime.close();
        lifetime.close();

        let result = lifetime.spawn(async {});
        assert!(matches!(result, Err(Error::ViewClosed)));
    }

    #[test]
    fn test_spawn_without_runtime_fails() {
        let lifetime = ViewLifetime::new();
        let result = lifetime.spawn(async {});
        assert!(matches!(result, Err(Error::Runtime(_))));
    }
}
