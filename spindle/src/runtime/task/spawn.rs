use crate::error::SpawnError;
use crate::runtime::context::CURRENT_SPAWNER;
use crate::runtime::task::TaskId;

use std::future::Future;

/// Spawns a future onto the executor currently running on this thread.
///
/// This is meant to be called from inside a task, where the executor that
/// polls it has installed itself as the current context. The new task is
/// enqueued behind everything already waiting and is driven by the same
/// [`run_to_completion`](crate::Executor::run_to_completion) call.
///
/// # Panics
///
/// Panics if called outside the context of a running executor. Use
/// [`try_spawn`] to handle that case, or hold on to a
/// [`Spawner`](crate::Spawner) to spawn from arbitrary threads.
///
/// # Examples
///
/// ```rust,ignore
/// executor.spawn(async {
///     spindle::spawn(async {
///         println!("spawned from a task");
///     });
/// });
/// ```
pub fn spawn<F>(future: F) -> TaskId
where
    F: Future<Output = ()> + Send + 'static,
{
    try_spawn(future).unwrap_or_else(|err| panic!("{err}"))
}

/// Spawns a future onto the executor currently running on this thread.
///
/// Returns [`SpawnError::NoRuntime`] if no executor is running here.
pub fn try_spawn<F>(future: F) -> Result<TaskId, SpawnError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let spawner = CURRENT_SPAWNER
        .with(|cell| cell.borrow().clone())
        .ok_or(SpawnError::NoRuntime)?;

    Ok(spawner.spawn(future))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_spawn_outside_runtime_fails() {
        assert_eq!(try_spawn(async {}), Err(SpawnError::NoRuntime));
    }

    #[test]
    #[should_panic(expected = "within the context of a running executor")]
    fn test_spawn_outside_runtime_panics() {
        spawn(async {});
    }
}
