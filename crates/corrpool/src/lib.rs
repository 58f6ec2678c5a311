//! # corrpool
//!
//! A fixed-size worker-thread pool with correlated result retrieval.
//!
//! Submit work tagged with a caller-chosen identifier; retrieve its
//! result later by that same identifier. No future, no channel per job
//! — correlation happens through the identifier alone, mirroring the
//! C thread-pool API this crate descends from.
//!
//! ```
//! use corrpool::Pool;
//!
//! let pool = Pool::new(4).unwrap();
//! pool.add_work(1, |_| 41 + 1).unwrap();
//! let result = pool.find_result_default(1).unwrap();
//! assert_eq!(result, 42);
//! pool.wait();
//! ```
//!
//! `corrpool-core` holds the platform-agnostic types (job, queue,
//! semaphore, error, logging); `corrpool-runtime` holds the
//! platform-specific halves (worker threads, pause/resume signal
//! plumbing, pool lifecycle).

pub use corrpool_core::job::Arg;
pub use corrpool_core::{JobId, PoolError, Result};
pub use corrpool_runtime::Config;

use corrpool_runtime::PoolInner;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default retry budget for [`Pool::find_result_default`]: 5ms
/// intervals for up to 5 seconds, matching the `thpool_find_result`
/// polling convention this crate is descended from.
const DEFAULT_FIND_RESULT_INTERVAL: Duration = Duration::from_millis(5);
const DEFAULT_FIND_RESULT_RETRIES: u32 = 1000;

/// A cheaply-cloneable handle to a running worker pool.
///
/// All clones share the same workers, queues and running state;
/// dropping the last clone tears the pool down the same way
/// [`Pool::destroy`] does.
///
/// `PoolInner`'s public methods are all `&self` over interior atomics
/// and per-queue mutexes (the one exception, `destroy`'s worker-handle
/// join, guards only its own small mutex inside `PoolInner`), so unlike
/// an earlier revision of this facade, there is no outer lock here: a
/// `find_result` polling for seconds, or a `wait` blocked on drain,
/// never holds up a concurrent `add_work`/`find_result` from another
/// caller.
#[derive(Clone)]
pub struct Pool {
    inner: Arc<PoolInner>,
    next_id: Arc<AtomicI64>,
}

impl Pool {
    /// Start a pool with `num_threads` workers, using default
    /// configuration for everything else. Negative counts clamp to
    /// zero, matching the C API this crate is descended from.
    pub fn new(num_threads: i64) -> Result<Self> {
        Self::with_config(Config::new().num_workers(num_threads.max(0) as usize))
    }

    /// Start a pool from an explicit [`Config`].
    pub fn with_config(config: Config) -> Result<Self> {
        let inner = PoolInner::new(config)?;
        Ok(Self {
            inner: Arc::new(inner),
            next_id: Arc::new(AtomicI64::new(1)),
        })
    }

    /// Enqueue a unit of work under `id`. `id` need not be unique; a
    /// duplicate's result is retrieved front-first by `find_result`.
    pub fn add_work<F>(&self, id: i64, func: F) -> Result<()>
    where
        F: FnOnce(Arg) -> i64 + Send + 'static,
    {
        self.inner.add_work(JobId::new(id), Arg::NONE, func)
    }

    /// Enqueue a unit of work under `id`, passing `arg` through to the
    /// payload verbatim.
    pub fn add_work_with_arg<F>(&self, id: i64, arg: Arg, func: F) -> Result<()>
    where
        F: FnOnce(Arg) -> i64 + Send + 'static,
    {
        self.inner.add_work(JobId::new(id), arg, func)
    }

    /// Generate a fresh caller-facing identifier, for callers that do
    /// not already have a natural correlation key of their own. Not
    /// part of the original C API's surface, but a convenience every
    /// caller of it otherwise reimplements (see `original_source/example.c`'s
    /// own `rand()`-based identifier generation).
    pub fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Poll for `id`'s result, retrying up to `max_retries` times with
    /// `interval` between attempts.
    pub fn find_result(&self, id: i64, max_retries: u32, interval: Duration) -> Result<i64> {
        self.inner.find_result(JobId::new(id), max_retries, interval)
    }

    /// [`Pool::find_result`] with a generous default retry budget.
    pub fn find_result_default(&self, id: i64) -> Result<i64> {
        self.find_result(id, DEFAULT_FIND_RESULT_RETRIES, DEFAULT_FIND_RESULT_INTERVAL)
    }

    /// Block until the input queue is empty and no worker is mid-job.
    pub fn wait(&self) {
        self.inner.wait();
    }

    /// Suspend every worker at its next opportunity.
    pub fn pause(&self) -> Result<()> {
        self.inner.pause()
    }

    /// Resume a paused pool.
    pub fn resume(&self) -> Result<()> {
        self.inner.resume()
    }

    /// Number of workers currently mid-job.
    pub fn num_threads_working(&self) -> usize {
        self.inner.num_threads_working()
    }

    /// Number of workers alive (spawned and not yet exited).
    pub fn num_threads_alive(&self) -> usize {
        self.inner.num_threads_alive()
    }

    /// Number of completed jobs waiting in the output queue.
    pub fn queue_out_len(&self) -> usize {
        self.inner.queue_out_len()
    }

    /// Number of jobs still waiting to run.
    pub fn queue_in_len(&self) -> usize {
        self.inner.queue_in_len()
    }

    /// Tear the pool down: stop accepting work, let workers drain the
    /// backlog during a bounded soft phase, then wait unboundedly for
    /// stragglers before joining every worker thread. Idempotent; also
    /// runs automatically when the last clone is dropped.
    pub fn destroy(&self) -> Result<()> {
        self.inner.destroy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_of_increments_four_workers() {
        let pool = Pool::new(4).unwrap();
        let total = Arc::new(AtomicI64::new(0));
        for i in 0..1000 {
            let total = Arc::clone(&total);
            pool.add_work(i, move |_| {
                total.fetch_add(1, Ordering::SeqCst);
                0
            })
            .unwrap();
        }
        pool.wait();
        assert_eq!(total.load(Ordering::SeqCst), 1000);
        pool.destroy().unwrap();
    }

    #[test]
    fn test_active_worker_count_while_sleeping() {
        let pool = Pool::new(4).unwrap();
        for i in 0..4 {
            pool.add_work(i, |_| {
                std::thread::sleep(Duration::from_millis(100));
                0
            })
            .unwrap();
        }
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(pool.num_threads_working(), 4);
        pool.wait();
        assert_eq!(pool.num_threads_working(), 0);
        pool.destroy().unwrap();
    }

    #[test]
    fn test_duplicate_identifiers_front_first() {
        let pool = Pool::new(1).unwrap();
        // Single worker keeps submission order == completion order,
        // so duplicate ids resolve front-first deterministically.
        pool.add_work(7, |_| 1).unwrap();
        pool.add_work(7, |_| 2).unwrap();
        pool.wait();
        assert_eq!(pool.find_result_default(7).unwrap(), 1);
        assert_eq!(pool.find_result_default(7).unwrap(), 2);
        pool.destroy().unwrap();
    }

    #[test]
    fn test_negative_worker_count_clamps_to_zero() {
        let pool = Pool::new(-5).unwrap();
        assert_eq!(pool.num_threads_alive(), 0);
        pool.destroy().unwrap();
    }

    #[test]
    fn test_find_result_bounded_retry_times_out() {
        let pool = Pool::new(1).unwrap();
        let start = std::time::Instant::now();
        let result = pool.find_result(42, 5, Duration::from_millis(5));
        assert_eq!(result, Err(PoolError::NotFound));
        assert!(start.elapsed() >= Duration::from_millis(20));
        pool.destroy().unwrap();
    }

    #[test]
    fn test_destroy_during_backlog() {
        let pool = Pool::new(2).unwrap();
        for i in 0..200 {
            pool.add_work(i, |_| {
                std::thread::sleep(Duration::from_micros(500));
                0
            })
            .unwrap();
        }
        pool.destroy().unwrap();
        assert_eq!(pool.num_threads_alive(), 0);
    }

    #[test]
    fn test_find_result_does_not_block_concurrent_add_work() {
        // A `find_result` polling for a nonexistent id holds no lock an
        // `add_work` from another thread would contend on; the second
        // thread's submission must land, and its own `find_result` must
        // succeed, well before the first thread's retry budget expires.
        let pool = Pool::new(2).unwrap();
        let pool2 = pool.clone();
        let blocker = std::thread::spawn(move || {
            pool2.find_result(999, 200, Duration::from_millis(20))
        });
        std::thread::sleep(Duration::from_millis(10));

        let start = std::time::Instant::now();
        pool.add_work(1, |_| 42).unwrap();
        let result = pool.find_result_default(1).unwrap();
        assert_eq!(result, 42);
        assert!(start.elapsed() < Duration::from_millis(500));

        assert_eq!(blocker.join().unwrap(), Err(PoolError::NotFound));
        pool.destroy().unwrap();
    }

    #[test]
    fn test_pause_resume_halts_progress() {
        let pool = Pool::new(2).unwrap();
        pool.pause().unwrap();
        let done = Arc::new(AtomicI64::new(0));
        let done_job = Arc::clone(&done);
        pool.add_work(1, move |_| {
            done_job.store(1, Ordering::SeqCst);
            0
        })
        .unwrap();
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(done.load(Ordering::SeqCst), 0);
        pool.resume().unwrap();
        pool.wait();
        assert_eq!(done.load(Ordering::SeqCst), 1);
        pool.destroy().unwrap();
    }
}
