//! Deferred execution of block render tasks.

use crate::error::DocumentError;
use std::collections::VecDeque;
use std::fmt;

/// Work item that rewrites one code block.
pub type RenderTask = Box<dyn FnOnce() -> Result<(), DocumentError>>;

/// Runs render tasks at some later point, outside the caller's stack frame.
pub trait Scheduler {
    /// Queue `task` to run after the current call returns.
    fn defer(&mut self, task: RenderTask);
}

/// FIFO queue of deferred tasks, drained explicitly by its owner.
#[derive(Default)]
pub struct DeferredQueue {
    tasks: VecDeque<RenderTask>,
}

impl DeferredQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if no task is waiting.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run queued tasks in order until the queue is empty.
    ///
    /// A failing task does not stop the others. Each failure is logged and returned.
    pub fn run_until_idle(&mut self) -> Vec<DocumentError> {
        let mut failures = Vec::new();
        while let Some(task) = self.tasks.pop_front() {
            if let Err(err) = task() {
                tracing::error!(error = %err, "deferred render task failed");
                failures.push(err);
            }
        }
        failures
    }
}

impl Scheduler for DeferredQueue {
    fn defer(&mut self, task: RenderTask) {
        self.tasks.push_back(task);
    }
}

impl fmt::Debug for DeferredQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("pending", &self.tasks.len())
            .finish()
    }
}
