//! Next-frame scheduling for deferred dismissal
//!
//! Dismissing a single toast publishes its dismissal event on the next
//! "frame" instead of inline, so a dismissal issued while an observer is
//! rendering does not re-enter that observer mid-frame.
//!
//! The scheduler only decides *when* a task runs. The toaster additionally
//! holds tasks issued during a publish on the router until that publish
//! returns, whichever variant is configured.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Work deferred to the next frame
pub type FrameTask = Box<dyn FnOnce() + Send + 'static>;

/// Where deferred work runs
#[derive(Clone, Default)]
pub enum FrameScheduler {
    /// Spawn onto the current tokio runtime after a yield; runs inline when
    /// no runtime is available
    #[default]
    Tokio,
    /// Run inline, no deferral
    Immediate,
    /// Queue until the embedder calls [`FrameQueue::run_pending`]
    Manual(FrameQueue),
}

impl FrameScheduler {
    /// Schedule a task for the next frame
    pub fn schedule(&self, task: FrameTask) {
        match self {
            FrameScheduler::Tokio => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        tokio::task::yield_now().await;
                        task();
                    });
                }
                Err(_) => {
                    tracing::trace!("No tokio runtime, running frame task inline");
                    task();
                }
            },
            FrameScheduler::Immediate => task(),
            FrameScheduler::Manual(queue) => queue.push(task),
        }
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameScheduler::Tokio => write!(f, "Tokio"),
            FrameScheduler::Immediate => write!(f, "Immediate"),
            FrameScheduler::Manual(queue) => f.debug_tuple("Manual").field(queue).finish(),
        }
    }
}

/// Frame task queue driven by the embedder's own paint loop
#[derive(Clone, Default)]
pub struct FrameQueue {
    tasks: Arc<Mutex<VecDeque<FrameTask>>>,
}

impl FrameQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, task: FrameTask) {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(task);
    }

    /// Run every task queued before this call
    ///
    /// Tasks scheduled while running wait for the next call. Returns the
    /// number of tasks run.
    pub fn run_pending(&self) -> usize {
        let batch: Vec<FrameTask> = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();

        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }

    /// Number of queued tasks
    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameQueue").field("pending", &self.len()).finish()
    }
}
