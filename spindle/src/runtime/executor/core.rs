use crate::runtime::builder::{Builder, Config};
use crate::runtime::context::enter_context;
use crate::runtime::core::Runtime;
use crate::runtime::queue::{Entry, QueueHandle, ReadyQueue};
use crate::runtime::task::{Task, TaskId};

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use tracing::trace;

/// Single-threaded cooperative executor.
///
/// The `Executor` is responsible for:
/// - assigning ids to spawned tasks,
/// - feeding them into its ready queue,
/// - driving every task to completion on the thread that calls
///   [`run_to_completion`](Self::run_to_completion).
///
/// Spawning is fire-and-forget: no handle to a task's output is returned.
/// Use [`block_on`](Self::block_on) to get the output of one root future.
///
/// # Examples
///
/// ```rust,ignore
/// let mut executor = Executor::new();
///
/// executor.spawn(async {
///     println!("hello from a task");
/// });
///
/// executor.run_to_completion();
/// ```
#[derive(Debug)]
pub struct Executor {
    /// Spawn handle sharing this executor's queue and id counter.
    spawner: Spawner,

    /// Settings applied to every run.
    config: Config,
}

impl Executor {
    /// Creates an executor with default settings.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Returns a [`Builder`] to configure a new executor.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn with_config(config: Config) -> Self {
        Self {
            spawner: Spawner::new(Arc::new(ReadyQueue::new())),
            config,
        }
    }

    /// Spawns a future onto this executor.
    ///
    /// The task is enqueued immediately but only polled once
    /// [`run_to_completion`](Self::run_to_completion) is running.
    pub fn spawn<F>(&self, future: F) -> TaskId
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.spawner.spawn(future)
    }

    /// Returns a handle that can spawn onto this executor from any thread.
    pub fn spawner(&self) -> Spawner {
        self.spawner.clone()
    }

    /// Polls tasks on the current thread until every task is done.
    ///
    /// This blocks until the ready queue is empty and no task is waiting for
    /// a wake. Tasks spawned by other tasks, or from other threads through a
    /// [`Spawner`] while the run is in progress, are driven as well.
    ///
    /// A task that returns `Pending` without arranging for its waker to be
    /// called makes this method block forever.
    pub fn run_to_completion(&mut self) {
        let mut runtime = Runtime::new(self.spawner.queue.clone(), self.config.idle_timeout);

        enter_context(self.spawner.clone(), || runtime.run());
    }

    /// Runs a future to completion and returns its output.
    ///
    /// The future is spawned as a task and the executor is run until all
    /// tasks, not just this one, have finished.
    ///
    /// # Panics
    ///
    /// Panics if the run ends without the future producing a value, which
    /// can only happen if the future itself panicked.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let result = executor.block_on(async { 42 });
    /// assert_eq!(result, 42);
    /// ```
    pub fn block_on<F>(&mut self, future: F) -> F::Output
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let (transmitter, receiver) = mpsc::channel();

        self.spawn(async move {
            let result = future.await;
            let _ = transmitter.send(result);
        });

        self.run_to_completion();

        receiver.recv().expect("block_on future did not complete")
    }

    /// Returns the configured idle timeout.
    pub fn idle_timeout(&self) -> Duration {
        self.config.idle_timeout
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable handle for spawning tasks onto an [`Executor`].
///
/// Spawners share the executor's queue and id counter, so tasks spawned
/// through any of them get unique, increasing ids and are driven by the same
/// [`run_to_completion`](Executor::run_to_completion) call.
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Queue new tasks are pushed onto.
    pub(crate) queue: QueueHandle,

    /// Next id to hand out.
    next_id: Arc<AtomicU64>,
}

impl Spawner {
    fn new(queue: QueueHandle) -> Self {
        Self {
            queue,
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Spawns a future onto the executor this handle belongs to.
    pub fn spawn<F>(&self, future: F) -> TaskId
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let id = TaskId::new(self.next_id.fetch_add(1, Ordering::Relaxed));

        trace!(task.id = %id, "spawn");
        self.queue.enqueue(Entry::Spawned(Task::new(id, future)));

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::thread;

    #[test]
    fn test_task_ids_increase() {
        let executor = Executor::new();
        let spawner = executor.spawner();

        let a = executor.spawn(async {});
        let b = spawner.spawn(async {});
        let c = executor.spawn(async {});

        assert!(a < b && b < c);
        assert_eq!(executor.spawner.queue.len(), 3);
    }

    #[test]
    fn test_executors_have_independent_counters() {
        let first = Executor::new();
        let second = Executor::new();

        assert_eq!(first.spawn(async {}), second.spawn(async {}));
    }

    #[test]
    fn test_spawn_from_other_thread_before_run() {
        let mut executor = Executor::new();
        let spawner = executor.spawner();
        let log = Arc::new(Mutex::new(Vec::new()));

        let log_clone = log.clone();
        thread::spawn(move || {
            spawner.spawn(async move {
                log_clone.lock().unwrap().push("remote");
            });
        })
        .join()
        .unwrap();

        executor.run_to_completion();

        assert_eq!(*log.lock().unwrap(), vec!["remote"]);
    }

    #[test]
    fn test_executor_can_run_twice() {
        let mut executor = Executor::new();

        assert_eq!(executor.block_on(async { 1 }), 1);
        assert_eq!(executor.block_on(async { 2 }), 2);
    }
}
