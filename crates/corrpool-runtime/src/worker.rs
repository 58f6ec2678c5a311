//! The worker: a single OS thread running the pool's take-a-job loop.

use crate::signal;
use corrpool_core::log::{clear_worker_id, set_worker_id};
use corrpool_core::{cpdebug, cperror, cptrace, JobQueue, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// State every worker thread of a pool shares, independent of any
/// individual worker's identity.
pub struct SharedState {
    pub queue_in: Arc<JobQueue>,
    pub queue_out: Arc<JobQueue>,
    pub keepalive: Arc<AtomicBool>,
    pub on_hold: Arc<AtomicBool>,
    pub worker_yield: bool,
    pub num_threads_alive: Arc<AtomicUsize>,
    pub num_threads_working: Arc<AtomicUsize>,
    pub all_idle: Arc<(Mutex<()>, Condvar)>,
}

/// Grain of the cooperative hold-check: a worker that picks up a job
/// while `on_hold` is set waits this long between rechecks instead of
/// spinning tightly.
const HOLD_COOPERATIVE_POLL: Duration = Duration::from_millis(50);

/// Spawn one worker thread. Returns immediately; the worker increments
/// `num_threads_alive` itself once its prologue (thread naming, pause
/// handler installation) completes.
pub fn spawn(worker_id: usize, shared: Arc<SharedState>) -> JoinHandle<()> {
    thread::Builder::new()
        .name(format!("corrpool-worker-{worker_id}"))
        .spawn(move || run(worker_id, shared))
        .expect("failed to spawn corrpool worker thread")
}

fn run(worker_id: usize, shared: Arc<SharedState>) {
    set_worker_id(worker_id);

    if let Err(e) = signal::install(&shared.on_hold) {
        cperror!("worker {worker_id} failed to install pause handler: {e}");
    }

    shared.num_threads_alive.fetch_add(1, Ordering::SeqCst);
    cpdebug!("worker {worker_id} alive");

    while shared.keepalive.load(Ordering::SeqCst) {
        shared.queue_in.has_jobs.wait();
        if !shared.keepalive.load(Ordering::SeqCst) {
            break;
        }

        // Cooperative pause: a worker that wakes while held parks here,
        // polling at a coarse grain, rather than dequeuing and running
        // more work. The OS-signal path in `signal::unix` additionally
        // suspends a worker blocked inside a job's payload.
        while shared.on_hold.load(Ordering::SeqCst) {
            thread::sleep(HOLD_COOPERATIVE_POLL);
        }

        // Mark this worker as working *before* dequeuing: `wait()`'s
        // quiescence predicate reads `queue_in.len() == 0 &&
        // num_threads_working == 0`, so incrementing after the pull
        // would leave a window where the last job is off `queue_in` but
        // not yet counted as running — `wait()` could return before it
        // finishes. Incrementing first keeps the count nonzero for the
        // whole dequeue-through-run span.
        let (lock, condvar) = &*shared.all_idle;
        {
            let _guard = lock.lock().unwrap();
            shared.num_threads_working.fetch_add(1, Ordering::SeqCst);
        }

        let job = shared.queue_in.pull_front();
        if let Some(mut job) = job {
            let id = job.id;
            cptrace!("worker {worker_id} running job {id}");
            let result = job.run();
            if result == i64::MIN {
                cperror!("worker {worker_id} job {id} panicked");
            }
            shared.queue_out.push(job);
        }

        // Another worker may have won the race for the job this worker
        // woke up for; either way the working count must come back down
        // and `all_idle` signals only on the 0-transition.
        let remaining = {
            let _guard = lock.lock().unwrap();
            shared.num_threads_working.fetch_sub(1, Ordering::SeqCst) - 1
        };
        if remaining == 0 {
            condvar.notify_all();
        }

        if shared.worker_yield {
            thread::yield_now();
        }
    }

    shared.num_threads_alive.fetch_sub(1, Ordering::SeqCst);
    clear_worker_id();
    cpdebug!("worker {worker_id} exiting");
}

/// Send the pause signal to one worker's OS thread.
pub fn pause_one(handle: &JoinHandle<()>) -> Result<()> {
    signal::send_pause(handle)
}
