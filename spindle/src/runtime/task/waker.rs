use crate::runtime::queue::{Entry, QueueHandle};
use crate::runtime::task::TaskId;

use std::sync::Arc;
use std::task::{Wake, Waker};

use tracing::trace;

/// Wake target for a single task.
///
/// A `TaskWaker` holds only the task id and a handle to the ready queue. It
/// never owns the task itself, so no reference cycle can form between the
/// runtime's registry and the wakers handed out to futures.
///
/// Waking simply enqueues the id again. It never polls, never blocks and may
/// be called any number of times from any thread; duplicate wakes result in
/// extra polls that the runtime absorbs.
pub(crate) struct TaskWaker {
    /// Task to re-admit on wake.
    id: TaskId,

    /// Queue the id is pushed onto.
    queue: QueueHandle,
}

impl TaskWaker {
    /// Creates a [`Waker`] that re-enqueues `id` on `queue`.
    pub(crate) fn waker(id: TaskId, queue: QueueHandle) -> Waker {
        Waker::from(Arc::new(Self { id, queue }))
    }
}

impl Wake for TaskWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        trace!(task.id = %self.id, "wake");
        self.queue.enqueue(Entry::Woken(self.id));
    }
}
