use spindle::Executor;
use spindle::time::sleep;
use std::thread;
use std::time::Duration;

fn main() {
    let mut executor = Executor::new();
    let spawner = executor.spawner();

    executor.spawn(async {
        sleep(Duration::from_millis(200)).await;
        println!("local task done");
    });

    let producer = thread::spawn(move || {
        for i in 0..3 {
            thread::sleep(Duration::from_millis(50));
            let id = spawner.spawn(async move {
                println!("remote task {i} ran");
            });
            println!("spawned remote task {id}");
        }
    });

    executor.run_to_completion();

    producer.join().expect("producer thread panicked");
}
