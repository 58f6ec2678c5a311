//! Correlation example: random, possibly-duplicate identifiers, mirroring
//! the original C example's `rand()`-seeded `thpool_add_work`/
//! `thpool_find_result` loop.
//!
//! No `rand` dependency is introduced for this — a small xorshift
//! generator seeded from the system clock is enough for a demo that
//! just wants identifiers in `1..=NUM_TASKS` with realistic duplicates.

use corrpool::Pool;
use std::time::{SystemTime, UNIX_EPOCH};

const NUM_TASKS: usize = 100;
const FIND_RESULT_MAX_RETRIES: u32 = 10_000;
const FIND_RESULT_INTERVAL_NS: u64 = 10_000;

struct Xorshift64(u64);

impl Xorshift64 {
    fn seeded() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos() as u64;
        Self(nanos | 1)
    }

    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    /// Uniform-ish value in `[min, max]`.
    fn range(&mut self, min: i64, max: i64) -> i64 {
        min + (self.next() % (max - min + 1) as u64) as i64
    }
}

fn task(arg: i64) -> i64 {
    arg + 100
}

fn main() {
    println!("=== corrpool correlate example ===\n");

    let mut rng = Xorshift64::seeded();
    let ids: Vec<i64> = (0..NUM_TASKS).map(|_| rng.range(1, NUM_TASKS as i64)).collect();

    let pool = Pool::new(4).expect("failed to start pool");

    println!("Adding {NUM_TASKS} tasks with random (possibly duplicate) identifiers");
    for &id in &ids {
        pool.add_work(id, move |_| task(id)).expect("add_work failed");
    }

    println!("\nRetrieving results:");
    let mut mismatches = 0;
    let mut misses = 0;
    for &id in &ids {
        match pool.find_result(
            id,
            FIND_RESULT_MAX_RETRIES,
            std::time::Duration::from_nanos(FIND_RESULT_INTERVAL_NS),
        ) {
            Ok(result) => {
                if result != task(id) {
                    mismatches += 1;
                }
            }
            Err(_) => misses += 1,
        }
    }

    pool.wait();
    pool.destroy().expect("destroy failed");

    println!("mismatches = {mismatches}");
    println!("misses     = {misses}");
    println!("\n=== Example complete ===");
}
