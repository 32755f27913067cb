use spindle::Executor;
use spindle::time::sleep;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut executor = Executor::builder()
        .idle_timeout(Duration::from_millis(5))
        .build()
        .expect("failed to build executor");

    executor.spawn(async {
        sleep(Duration::from_secs(1)).await;
        info!("sleeper done");
    });

    executor.spawn(async {
        info!(value = 5, "immediate task done");
    });

    let start = Instant::now();
    executor.run_to_completion();

    info!(elapsed = ?start.elapsed(), "all tasks finished");
}
