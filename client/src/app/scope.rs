//! # Task Scope
//!
//! Tasks spawned by a screen live only as long as the screen visit. Navigation
//! aborts whatever is still running.

use std::future::Future;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct TaskScope {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        let mut handles = self.handles.lock();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Abort every task still running. Returns how many were aborted.
    pub fn cancel_all(&self) -> usize {
        let handles: Vec<_> = self.handles.lock().drain(..).collect();
        let mut aborted = 0;
        for handle in handles {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        if aborted > 0 {
            tracing::debug!(aborted, "Cancelled screen tasks");
        }
        aborted
    }

    pub fn pending(&self) -> usize {
        self.handles.lock().iter().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        for handle in self.handles.get_mut().drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_aborts_running_tasks() {
        let scope = TaskScope::new();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        scope.spawn(async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            let _ = tx.send(());
        });
        assert_eq!(scope.pending(), 1);

        assert_eq!(scope.cancel_all(), 1);
        assert_eq!(scope.pending(), 0);
        // Sender dropped by the abort
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn test_finished_tasks_are_not_counted() {
        let scope = TaskScope::new();
        scope.spawn(async {});
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(scope.pending(), 0);
        assert_eq!(scope.cancel_all(), 0);
    }
}
