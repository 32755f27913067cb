use spindle::time::sleep;
use spindle::{Executor, TaskId, yield_now};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

fn spawn_tree(depth: usize, counter: Arc<AtomicUsize>) {
    counter.fetch_add(1, Ordering::SeqCst);

    if depth == 0 {
        return;
    }

    for _ in 0..2 {
        let counter = counter.clone();
        spindle::spawn(async move {
            yield_now().await;
            spawn_tree(depth - 1, counter);
        });
    }
}

#[test]
fn test_transitively_spawned_tasks_complete() {
    let mut executor = Executor::new();
    let counter = Arc::new(AtomicUsize::new(0));

    let root = counter.clone();
    executor.spawn(async move {
        spawn_tree(4, root);
    });

    executor.run_to_completion();

    // 1 + 2 + 4 + 8 + 16 nodes
    assert_eq!(counter.load(Ordering::SeqCst), 31);
}

#[test]
fn test_spawned_task_runs_after_spawner_yields() {
    let mut executor = Executor::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let outer = log.clone();
    executor.spawn(async move {
        let inner = outer.clone();
        spindle::spawn(async move {
            inner.lock().unwrap().push("child");
        });

        outer.lock().unwrap().push("parent before yield");
        yield_now().await;
        outer.lock().unwrap().push("parent after yield");
    });

    executor.run_to_completion();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["parent before yield", "child", "parent after yield"]
    );
}

#[test]
fn test_try_spawn_inside_runtime() {
    let mut executor = Executor::new();

    let id = executor.block_on(async { spindle::try_spawn(async {}) });

    assert!(id.is_ok());
}

#[test]
fn test_context_is_cleared_after_run() {
    let mut executor = Executor::new();
    executor.run_to_completion();

    assert!(spindle::try_spawn(async {}).is_err());
}

#[test]
fn test_spawner_from_other_thread_during_run() {
    let mut executor = Executor::new();
    let spawner = executor.spawner();
    let ran = Arc::new(AtomicUsize::new(0));

    // Keeps the run alive while the other thread spawns.
    executor.spawn(async {
        sleep(Duration::from_millis(100)).await;
    });

    let remote = ran.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        (0..10)
            .map(|_| {
                let remote = remote.clone();
                spawner.spawn(async move {
                    remote.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect::<Vec<TaskId>>()
    });

    executor.run_to_completion();
    let ids = handle.join().unwrap();

    assert_eq!(ran.load(Ordering::SeqCst), 10);
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_yield_now_interleaves_tasks() {
    let mut executor = Executor::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    for name in ["a", "b"] {
        let log = log.clone();
        executor.spawn(async move {
            for step in 0..3 {
                log.lock().unwrap().push(format!("{name}{step}"));
                yield_now().await;
            }
        });
    }

    executor.run_to_completion();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["a0", "b0", "a1", "b1", "a2", "b2"]
    );
}
