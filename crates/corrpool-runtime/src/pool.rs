//! `PoolInner`: the platform-specific heart of the worker pool —
//! spawns, running state, quiescence detection and teardown.
//!
//! `corrpool::Pool` (in the facade crate) wraps this in an `Arc` and
//! exposes the public, cloneable API on top of it.

use crate::config::Config;
use crate::worker::{self, SharedState};
use corrpool_core::job::Arg;
use corrpool_core::{cpdebug, cpinfo, cpwarn, Job, JobId, JobQueue, PoolError, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// The running pool: spawned workers plus the shared queues and flags
/// they coordinate through.
pub struct PoolInner {
    queue_in: Arc<JobQueue>,
    queue_out: Arc<JobQueue>,
    keepalive: Arc<AtomicBool>,
    on_hold: Arc<AtomicBool>,
    num_threads_alive: Arc<AtomicUsize>,
    num_threads_working: Arc<AtomicUsize>,
    all_idle: Arc<(Mutex<()>, Condvar)>,
    /// Guarded only for `destroy`'s join pass — every other method here
    /// is `&self` over atomics/per-queue mutexes and never touches this
    /// lock, so a slow `find_result`/`wait` never blocks a concurrent
    /// `add_work`/`find_result` from another caller.
    handles: Mutex<Vec<JoinHandle<()>>>,
    config: Config,
    destroyed: AtomicBool,
}

impl PoolInner {
    /// Spawn `config.num_workers` workers and block until every one of
    /// them has reported itself alive, or `config.startup_timeout`
    /// elapses.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let queue_in = Arc::new(JobQueue::with_warn_threshold(
            config.max_queue_size_without_warning,
        ));
        let queue_out = Arc::new(JobQueue::with_warn_threshold(
            config.max_queue_size_without_warning,
        ));
        let keepalive = Arc::new(AtomicBool::new(true));
        let on_hold = Arc::new(AtomicBool::new(false));
        let num_threads_alive = Arc::new(AtomicUsize::new(0));
        let num_threads_working = Arc::new(AtomicUsize::new(0));
        let all_idle = Arc::new((Mutex::new(()), Condvar::new()));

        let shared = Arc::new(SharedState {
            queue_in: Arc::clone(&queue_in),
            queue_out: Arc::clone(&queue_out),
            keepalive: Arc::clone(&keepalive),
            on_hold: Arc::clone(&on_hold),
            worker_yield: config.worker_yield,
            num_threads_alive: Arc::clone(&num_threads_alive),
            num_threads_working: Arc::clone(&num_threads_working),
            all_idle: Arc::clone(&all_idle),
        });

        let handles: Vec<JoinHandle<()>> = (0..config.num_workers)
            .map(|id| worker::spawn(id, Arc::clone(&shared)))
            .collect();

        let deadline = Instant::now() + config.startup_timeout;
        let mut timed_out = false;
        while num_threads_alive.load(Ordering::SeqCst) < config.num_workers {
            if Instant::now() >= deadline {
                timed_out = true;
                break;
            }
            std::thread::sleep(config.startup_poll_interval);
        }

        let pool = Self {
            queue_in,
            queue_out,
            keepalive,
            on_hold,
            num_threads_alive,
            num_threads_working,
            all_idle,
            handles: Mutex::new(handles),
            config,
            destroyed: AtomicBool::new(false),
        };

        if timed_out {
            // All-or-nothing startup: tear down whatever did come up
            // before reporting failure, so a caller never holds a
            // half-started pool.
            let _ = pool.destroy();
            return Err(PoolError::StartupTimeout);
        }

        cpinfo!("pool started with {} workers", pool.config.num_workers);
        Ok(pool)
    }

    fn check_alive(&self) -> Result<()> {
        if self.destroyed.load(Ordering::SeqCst) {
            Err(PoolError::AlreadyDestroyed)
        } else {
            Ok(())
        }
    }

    /// Enqueue a unit of work under `id`. `id` need not be unique; see
    /// `JobQueue::pull_by_id` for the documented tie-break when it isn't.
    pub fn add_work<F>(&self, id: JobId, arg: Arg, func: F) -> Result<()>
    where
        F: FnOnce(Arg) -> i64 + Send + 'static,
    {
        self.check_alive()?;
        self.queue_in.push(Job::new(id, arg, func));
        Ok(())
    }

    /// Poll `queue_out` for a result matching `id`, retrying up to
    /// `max_retries` times with `interval` between attempts.
    pub fn find_result(&self, id: JobId, max_retries: u32, interval: Duration) -> Result<i64> {
        for attempt in 0..=max_retries {
            if let Some(job) = self.queue_out.pull_by_id(id) {
                return Ok(job.result.expect("completed job always carries a result"));
            }
            if attempt < max_retries {
                std::thread::sleep(interval);
            }
        }
        Err(PoolError::NotFound)
    }

    /// Block until `queue_in` is empty and no worker is mid-job.
    /// `queue_out` is deliberately not consulted — a caller that wants
    /// results drained must still call `find_result`.
    pub fn wait(&self) {
        let (lock, condvar) = &*self.all_idle;
        let guard = lock.lock().unwrap();
        let _guard = condvar
            .wait_while(guard, |_| {
                self.queue_in.len() != 0 || self.num_threads_working.load(Ordering::SeqCst) != 0
            })
            .unwrap();
    }

    /// Suspend every worker at its next opportunity: idle workers park
    /// cooperatively, and workers currently running a job are
    /// interrupted via the platform pause signal (unix) or simply left
    /// to finish their current job (elsewhere).
    pub fn pause(&self) -> Result<()> {
        self.check_alive()?;
        self.on_hold.store(true, Ordering::SeqCst);
        for handle in self.handles.lock().unwrap().iter() {
            worker::pause_one(handle)?;
        }
        Ok(())
    }

    /// Clear the hold flag. Workers spinning in the pause handler, or
    /// about to check it cooperatively, resume immediately.
    pub fn resume(&self) -> Result<()> {
        self.check_alive()?;
        self.on_hold.store(false, Ordering::SeqCst);
        Ok(())
    }

    pub fn num_threads_working(&self) -> usize {
        self.num_threads_working.load(Ordering::SeqCst)
    }

    pub fn num_threads_alive(&self) -> usize {
        self.num_threads_alive.load(Ordering::SeqCst)
    }

    pub fn queue_out_len(&self) -> usize {
        self.queue_out.len()
    }

    pub fn queue_in_len(&self) -> usize {
        self.queue_in.len()
    }

    /// Two-phase teardown: a bounded soft phase (repeated broadcast,
    /// checked against `config.destroy_soft_phase`) followed by an
    /// unbounded hard phase, then joins every worker thread. Idempotent.
    pub fn destroy(&self) -> Result<()> {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.keepalive.store(false, Ordering::SeqCst);

        let deadline = Instant::now() + self.config.destroy_soft_phase;
        while self.num_threads_alive.load(Ordering::SeqCst) != 0 && Instant::now() < deadline {
            self.queue_in.has_jobs.post_all();
            std::thread::sleep(Duration::from_millis(10));
        }
        if self.num_threads_alive.load(Ordering::SeqCst) != 0 {
            cpwarn!("destroy: soft phase expired, entering unbounded hard phase");
            while self.num_threads_alive.load(Ordering::SeqCst) != 0 {
                self.queue_in.has_jobs.post_all();
                std::thread::sleep(Duration::from_millis(10));
            }
        }

        for handle in self.handles.lock().unwrap().drain(..) {
            let _ = handle.join();
        }
        cpdebug!("pool destroyed");
        Ok(())
    }
}

impl Drop for PoolInner {
    fn drop(&mut self) {
        let _ = self.destroy();
    }
}
