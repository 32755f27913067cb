use spindle::Executor;
use spindle::time::sleep;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, PartialEq)]
enum Event {
    Value(u32),
    Marker,
}

#[test]
fn test_immediate_task_is_not_held_back_by_sleeper() {
    let mut executor = Executor::new();
    let events = Arc::new(Mutex::new(Vec::new()));

    let sleeper = events.clone();
    executor.spawn(async move {
        sleep(Duration::from_secs(1)).await;
        sleeper.lock().unwrap().push(Event::Marker);
    });

    let immediate = events.clone();
    executor.spawn(async move {
        let value = async { 5 }.await;
        immediate.lock().unwrap().push(Event::Value(value));
    });

    let start = Instant::now();
    executor.run_to_completion();
    let elapsed = start.elapsed();

    assert_eq!(*events.lock().unwrap(), vec![Event::Value(5), Event::Marker]);
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_millis(1500), "took {elapsed:?}");
}

#[test]
fn test_hundred_sleeps_run_concurrently() {
    let mut executor = Executor::new();
    let finished = Arc::new(Mutex::new(0));

    for _ in 0..100 {
        let finished = finished.clone();
        executor.spawn(async move {
            sleep(Duration::from_secs(1)).await;
            *finished.lock().unwrap() += 1;
        });
    }

    let start = Instant::now();
    executor.run_to_completion();
    let elapsed = start.elapsed();

    assert_eq!(*finished.lock().unwrap(), 100);
    assert!(elapsed < Duration::from_millis(1500), "took {elapsed:?}");
}
