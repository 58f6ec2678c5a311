//! Basic corrpool example.
//!
//! Submits a handful of jobs tagged with their own index, waits for the
//! pool to drain, then retrieves every result by identifier.

use corrpool::Pool;

fn main() {
    println!("=== corrpool basic example ===\n");

    let pool = Pool::new(4).expect("failed to start pool");
    println!("Started pool with {} workers", pool.num_threads_alive());

    const NUM_JOBS: i64 = 12;
    for i in 0..NUM_JOBS {
        pool.add_work(i, move |_| {
            println!("job {i} running on a worker");
            i * i
        })
        .expect("add_work failed");
    }

    pool.wait();
    println!("\nAll jobs drained, fetching results:");
    for i in 0..NUM_JOBS {
        match pool.find_result_default(i) {
            Ok(result) => println!("job {i} -> {result}"),
            Err(e) => println!("job {i} -> error: {e}"),
        }
    }

    pool.destroy().expect("destroy failed");
    println!("\n=== Example complete ===");
}
