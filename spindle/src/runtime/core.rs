use crate::runtime::queue::{Entry, QueueHandle};
use crate::runtime::task::{Task, TaskId, TaskWaker};

use std::collections::{HashMap, HashSet};
use std::task::{Context, Poll};
use std::time::Duration;

use tracing::{debug, trace, trace_span};

/// Phase of a single [`Runtime::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuntimeState {
    /// Entries are being dequeued and polled.
    Running,

    /// The queue came up empty but some tasks still wait for a wake.
    Draining,

    /// The queue is empty and nothing is pending. The loop has exited.
    Terminated,
}

/// The driving loop of an executor.
///
/// The runtime is the single consumer of the ready queue. It owns every live
/// task in a registry keyed by [`TaskId`], and the set of ids that returned
/// `Poll::Pending` and are waiting for their waker to fire.
///
/// One call to [`run`](Self::run) goes through the following cycle:
/// 1. Dequeue an entry, waiting at most `idle_timeout`
/// 2. Register the task if it was just spawned
/// 3. Poll it once with a fresh waker bound to its id
/// 4. On `Ready`, forget it; on `Pending`, mark it pending
/// 5. On timeout, stop if nothing is pending, otherwise keep waiting
///
/// A task that returns `Pending` without ever arranging a wake keeps the
/// pending set non-empty, and the loop keeps waiting on timeouts forever.
pub(crate) struct Runtime {
    /// Queue this runtime consumes.
    queue: QueueHandle,

    /// Live tasks. An id disappears from here once its task is `Ready`.
    tasks: HashMap<TaskId, Task>,

    /// Ids of tasks that returned `Pending` and have not completed since.
    pending: HashSet<TaskId>,

    /// How long a dequeue waits before re-checking for termination.
    idle_timeout: Duration,

    state: RuntimeState,

    /// Number of polls performed, including no-op ones.
    polls: u64,

    /// Number of tasks that reached `Ready`.
    completed: u64,
}

impl Runtime {
    /// Creates a runtime consuming `queue`.
    pub(crate) fn new(queue: QueueHandle, idle_timeout: Duration) -> Self {
        Self {
            queue,
            tasks: HashMap::new(),
            pending: HashSet::new(),
            idle_timeout,
            state: RuntimeState::Running,
            polls: 0,
            completed: 0,
        }
    }

    /// Runs until the queue is empty and no task is pending.
    pub(crate) fn run(&mut self) {
        self.state = RuntimeState::Running;
        debug!(idle_timeout = ?self.idle_timeout, "runtime started");

        while self.state != RuntimeState::Terminated {
            self.step();
        }

        debug!(
            polls = self.polls,
            completed = self.completed,
            "runtime terminated"
        );
    }

    /// Processes one dequeue attempt.
    fn step(&mut self) {
        let entry = self.queue.dequeue_timeout(self.idle_timeout);

        if let Some(entry) = &entry {
            trace!(task.id = %entry.task_id(), "dequeued");
        }

        match entry {
            Some(Entry::Spawned(task)) => {
                let id = task.id();
                self.tasks.insert(id, task);
                self.transition(RuntimeState::Running);
                self.poll_task(id);
            }
            Some(Entry::Woken(id)) => {
                self.transition(RuntimeState::Running);
                self.poll_task(id);
            }
            None if self.pending.is_empty() => self.transition(RuntimeState::Terminated),
            None => self.transition(RuntimeState::Draining),
        }
    }

    /// Polls the task registered under `id` once.
    ///
    /// Wakes for tasks that already completed find nothing in the registry
    /// and are dropped.
    fn poll_task(&mut self, id: TaskId) {
        let Some(task) = self.tasks.get_mut(&id) else {
            trace!(task.id = %id, "stale wake ignored");
            return;
        };

        let _span = trace_span!("poll", task.id = %id).entered();

        let waker = TaskWaker::waker(id, self.queue.clone());
        let mut cx = Context::from_waker(&waker);

        self.polls += 1;

        match task.poll(&mut cx) {
            Poll::Ready(()) => {
                self.tasks.remove(&id);
                self.pending.remove(&id);
                self.completed += 1;
                trace!("ready");
            }
            Poll::Pending => {
                self.pending.insert(id);
                trace!(pending = self.pending.len(), "pending");
            }
        }
    }

    fn transition(&mut self, next: RuntimeState) {
        if self.state == next {
            return;
        }

        debug!(
            from = ?self.state,
            to = ?next,
            pending = self.pending.len(),
            queued = self.queue.len(),
            "state change"
        );
        self.state = next;
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> RuntimeState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn polls(&self) -> u64 {
        self.polls
    }

    #[cfg(test)]
    pub(crate) fn completed(&self) -> u64 {
        self.completed
    }

    #[cfg(test)]
    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
