use crate::runtime::task::{Task, TaskId};

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Shared handle to the ready queue.
pub(crate) type QueueHandle = Arc<ReadyQueue>;

/// An item travelling through the ready queue.
///
/// Freshly spawned tasks carry their body so that the runtime can take
/// ownership of it; wakes only carry the id of a task the runtime already
/// owns.
#[derive(Debug)]
pub(crate) enum Entry {
    /// A new task, handed over to the runtime's registry on dequeue.
    Spawned(Task),

    /// A request to poll an already registered task again.
    Woken(TaskId),
}

impl Entry {
    pub(crate) fn task_id(&self) -> TaskId {
        match self {
            Entry::Spawned(task) => task.id(),
            Entry::Woken(id) => *id,
        }
    }
}

/// Multi-producer, single-consumer FIFO of runnable tasks.
///
/// Any thread may [`enqueue`](Self::enqueue); only the runtime loop calls
/// [`dequeue_timeout`](Self::dequeue_timeout). The queue is unbounded and
/// enqueueing never blocks beyond the short critical section of the lock.
#[derive(Debug)]
pub(crate) struct ReadyQueue {
    /// Entries waiting to be processed, oldest first.
    entries: Mutex<VecDeque<Entry>>,

    /// Signalled whenever an entry is pushed.
    available: Condvar,
}

impl ReadyQueue {
    /// Creates a new empty queue.
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
        }
    }

    /// Pushes an entry at the back of the queue and wakes the consumer.
    pub(crate) fn enqueue(&self, entry: Entry) {
        self.lock().push_back(entry);
        self.available.notify_one();
    }

    /// Pops the oldest entry, waiting up to `timeout` for one to arrive.
    ///
    /// Returns `None` if the queue stayed empty for the whole timeout.
    pub(crate) fn dequeue_timeout(&self, timeout: Duration) -> Option<Entry> {
        let entries = self.lock();

        let (mut entries, _) = self
            .available
            .wait_timeout_while(entries, timeout, |entries| entries.is_empty())
            .unwrap_or_else(PoisonError::into_inner);

        entries.pop_front()
    }

    /// Number of entries currently queued.
    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    // Nothing in the queue can be left half-updated by a panic, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
