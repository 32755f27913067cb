use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Type-erased task body.
///
/// Every spawned computation is boxed and pinned behind this alias so the
/// runtime can store tasks of arbitrary shapes side by side.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Identifier of a spawned task.
///
/// Ids are handed out by an executor from a monotonically increasing counter
/// and are never reused by that executor, so a late wake carrying the id of a
/// finished task can never reach a different task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value of this id.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A spawned unit of work owned by the runtime.
///
/// A `Task` pairs an id with the slot holding its future. The slot is emptied
/// the moment the future returns `Poll::Ready`, after which polling the task
/// again is a no-op that reports `Ready` without touching the computation.
///
/// Tasks are only ever reached through `&mut` from the runtime thread, so
/// exclusive access to the slot during a poll is guaranteed by ownership
/// rather than by a lock.
pub(crate) struct Task {
    /// Identity used by wakers to find this task again.
    id: TaskId,

    /// The computation, or `None` once it has completed.
    slot: Option<BoxFuture>,
}

impl Task {
    /// Wraps a future into a new task with the given id.
    pub(crate) fn new<F>(id: TaskId, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            id,
            slot: Some(Box::pin(future)),
        }
    }

    pub(crate) fn id(&self) -> TaskId {
        self.id
    }

    /// Returns `true` once the task's future has produced its output.
    pub(crate) fn is_complete(&self) -> bool {
        self.slot.is_none()
    }

    /// Polls the task's future once.
    ///
    /// Returns `Poll::Ready(())` immediately if the task already completed.
    pub(crate) fn poll(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        let Some(future) = self.slot.as_mut() else {
            return Poll::Ready(());
        };

        match future.as_mut().poll(cx) {
            Poll::Ready(()) => {
                self.slot = None;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("complete", &self.is_complete())
            .finish()
    }
}
