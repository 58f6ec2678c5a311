//! Stress example: a backlog large enough to cross
//! `Config::max_queue_size_without_warning`, plus a pause/resume round
//! trip mid-backlog.
//!
//! Run with `CORRPOOL_LOG_LEVEL=warn` (the default) to see the queue
//! length warning fire once the backlog crosses the threshold.

use corrpool::{Config, Pool};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const NUM_JOBS: i64 = 500;

fn main() {
    println!("=== corrpool stress example ===\n");

    let config = Config::new().num_workers(4).max_queue_size_without_warning(50);
    let pool = Pool::with_config(config).expect("failed to start pool");

    let completed = Arc::new(AtomicUsize::new(0));
    for i in 0..NUM_JOBS {
        let completed = Arc::clone(&completed);
        pool.add_work(i, move |_| {
            std::thread::sleep(Duration::from_micros(200));
            completed.fetch_add(1, Ordering::SeqCst);
            i
        })
        .expect("add_work failed");
    }

    println!("Queued {NUM_JOBS} jobs, queue_in_len = {}", pool.queue_in_len());

    std::thread::sleep(Duration::from_millis(20));
    println!("Pausing pool mid-backlog...");
    pool.pause().expect("pause failed");
    let before = completed.load(Ordering::SeqCst);
    std::thread::sleep(Duration::from_millis(100));
    let after = completed.load(Ordering::SeqCst);
    println!("completed before pause settled: {before}, after 100ms paused: {after}");

    println!("Resuming pool...");
    pool.resume().expect("resume failed");
    pool.wait();

    println!(
        "\nAll {} jobs completed, {} results waiting in queue_out",
        completed.load(Ordering::SeqCst),
        pool.queue_out_len()
    );

    pool.destroy().expect("destroy failed");
    println!("\n=== Example complete ===");
}
