use crate::runtime::executor::Spawner;

use std::cell::RefCell;

thread_local! {
    /// Spawn handle of the executor currently running on this thread.
    ///
    /// Set for the duration of
    /// [`run_to_completion`](crate::Executor::run_to_completion) so that
    /// tasks can spawn siblings without being handed an explicit handle.
    pub(crate) static CURRENT_SPAWNER: RefCell<Option<Spawner>> =
        const { RefCell::new(None) };
}

/// Enters the executor context for the current thread.
///
/// Installs `spawner` as the current spawn target while `f` runs and restores
/// whatever was installed before, so nested executors on the same thread
/// each see their own context.
pub(crate) fn enter_context<R>(spawner: Spawner, f: impl FnOnce() -> R) -> R {
    let previous = CURRENT_SPAWNER.with(|cell| cell.replace(Some(spawner)));

    // Also restored when a task panics through `f`.
    struct Restore(Option<Spawner>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let previous = self.0.take();
            CURRENT_SPAWNER.with(|cell| cell.replace(previous));
        }
    }

    let _restore = Restore(previous);

    f()
}
