use spindle::time::sleep;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[spindle::main]
async fn main() {
    let start = Instant::now();
    let done = Arc::new(AtomicUsize::new(0));

    for _ in 0..100 {
        let done = done.clone();
        spindle::spawn(async move {
            sleep(Duration::from_secs(1)).await;
            done.fetch_add(1, Ordering::SeqCst);
        });
    }

    while done.load(Ordering::SeqCst) < 100 {
        sleep(Duration::from_millis(50)).await;
    }

    println!("100 sleeps finished in {:?}", start.elapsed());
}
