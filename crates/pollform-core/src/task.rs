//! Deferred task queue.
//!
//! Tasks are executed in FIFO order. Each task runs to completion before the
//! next one is taken from the queue, which is what gives event handlers their
//! serialized, non-reentrant view of shared state.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::logging::targets;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

/// A single-owner FIFO task queue, driven through [`SharedTaskQueue`].
pub(crate) struct TaskQueue {
    tasks: VecDeque<TaskData>,
}

impl TaskQueue {
    /// Create a new, empty task queue.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    /// Post a task to the back of the queue.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post<F>(&mut self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        self.tasks.push_back(TaskData {
            id,
            task: Box::new(task),
        });
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks.remove(pos);
            true
        } else {
            false
        }
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    fn pop(&mut self) -> Option<TaskData> {
        self.tasks.pop_front()
    }
}

/// A thread-safe wrapper around [`TaskQueue`].
///
/// The queue lock is released while a task runs, so a task may post further
/// tasks. Those are picked up by the same `process_all` call.
pub struct SharedTaskQueue {
    inner: Mutex<TaskQueue>,
}

impl SharedTaskQueue {
    /// Create a new, empty shared queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TaskQueue::new()),
        }
    }

    /// Post a task to the back of the queue.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().post(task)
    }

    /// Cancel a pending task.
    pub fn cancel(&self, id: TaskId) -> bool {
        self.inner.lock().cancel(id)
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending_count()
    }

    /// Run the task at the front of the queue, if any.
    ///
    /// Returns `true` if a task was run.
    pub fn process_next(&self) -> bool {
        let next = self.inner.lock().pop();
        match next {
            Some(data) => {
                tracing::trace!(target: targets::TASK, task_id = data.id.as_u64(), "running task");
                (data.task)();
                true
            }
            None => false,
        }
    }

    /// Run tasks until the queue is empty.
    ///
    /// Returns the number of tasks processed.
    pub fn process_all(&self) -> usize {
        let mut count = 0;
        while self.process_next() {
            count += 1;
        }
        if count > 0 {
            crate::pollform_trace!(processed = count, "task queue drained");
        }
        count
    }
}

impl Default for SharedTaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(SharedTaskQueue: Send, Sync);
