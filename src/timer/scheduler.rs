//! Single-shot delayed callbacks

use std::time::Duration;

use tokio::{task::AbortHandle, time::sleep};
use tracing::trace;

/// Work item run once when its delay elapses
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Registers a callback to fire once after a delay.
///
/// Implementations are not required to support true cancellation; callers
/// must tolerate a cancelled task still running.
pub trait Scheduler: Send + Sync + 'static {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TickHandle;
}

/// Handle to a scheduled task
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    /// Create a handle that runs `cancel` when the task is cancelled
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Create a handle for a scheduler that cannot cancel
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    /// Cancel the task if it has not fired yet
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

/// Scheduler backed by a sleeping tokio task per registration.
///
/// `schedule` must be called from within a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TickHandle {
        trace!("Scheduling task in {:?}", delay);
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            task();
        });
        let abort: AbortHandle = handle.abort_handle();
        TickHandle::new(move || abort.abort())
    }
}
