//! Tracked background work.
//!
//! Detached tasks (e.g. notification dispatch triggered by a request) must finish
//! before the process exits, even after the HTTP listener has stopped.
//! [`BackgroundTasks`] is a counting barrier: the count is raised before a task is
//! launched, lowered when it completes, and shutdown waits for it to reach zero.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    in_flight: AtomicUsize,
    idle: Notify,
}

/// Cloneable handle to the process-wide background task counter.
#[derive(Debug, Clone, Default)]
pub struct BackgroundTasks {
    inner: Arc<Inner>,
}

/// Lowers the counter when dropped, including during a panic unwind.
struct Completion(Arc<Inner>);

impl Drop for Completion {
    fn drop(&mut self) {
        if self.0.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launches `task` as tracked background work.
    ///
    /// A panic inside the task is logged and does not propagate.
    pub fn spawn<F>(&self, name: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.inner.in_flight.fetch_add(1, Ordering::AcqRel);
        let completion = Completion(self.inner.clone());

        let handle = tokio::spawn(async move {
            let _completion = completion;
            task.await;
        });

        tokio::spawn(async move {
            if let Err(e) = handle.await
                && e.is_panic()
            {
                tracing::error!(task = name, "background task panicked");
            }
        });
    }

    /// Number of tasks launched and not yet completed.
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// Resolves once no tracked task is running.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.in_flight() == 0 {
                return;
            }
            notified.await;
        }
    }
}
