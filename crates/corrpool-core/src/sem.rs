//! Coalescing binary semaphore.
//!
//! A value in `{0,1}` with blocking wait, used by [`crate::queue::JobQueue`]
//! to signal "at least one job is present" to waiting workers.
//!
//! Any number of `post`s between two `wait`s collapse into exactly one
//! wake-up — this is deliberate. A counting semaphore would over-wake
//! workers that then find the queue empty; a bare condition variable
//! would require exposing the predicate at every call site. Modeled on
//! this workspace's `Mutex<bool>` + `Condvar` parking pattern rather than
//! a raw counter.

use std::sync::{Condvar, Mutex};

/// A one-bit signal with a coalescing, blocking `wait`.
pub struct BinarySemaphore {
    state: Mutex<bool>,
    condvar: Condvar,
}

impl BinarySemaphore {
    /// Create a semaphore with the given initial value.
    pub fn new(value: bool) -> Self {
        Self {
            state: Mutex::new(value),
            condvar: Condvar::new(),
        }
    }

    /// Block until the value is `true`, then atomically set it to `false`.
    ///
    /// Guards against spurious wakeups: the wait sits inside a loop on
    /// the predicate, never returning on a wakeup that finds the value
    /// still `false`.
    pub fn wait(&self) {
        let mut guard = self.state.lock().unwrap();
        while !*guard {
            guard = self.condvar.wait(guard).unwrap();
        }
        *guard = false;
    }

    /// Set the value to `true` and wake exactly one waiter.
    pub fn post(&self) {
        {
            let mut guard = self.state.lock().unwrap();
            *guard = true;
        }
        self.condvar.notify_one();
    }

    /// Set the value to `true` and wake every waiter.
    pub fn post_all(&self) {
        {
            let mut guard = self.state.lock().unwrap();
            *guard = true;
        }
        self.condvar.notify_all();
    }

    /// Set the value to `false` without waking anyone.
    pub fn reset(&self) {
        let mut guard = self.state.lock().unwrap();
        *guard = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_post_then_wait_does_not_block() {
        let sem = BinarySemaphore::new(false);
        sem.post();
        sem.wait(); // must return immediately
    }

    #[test]
    fn test_reset_clears_without_waking() {
        let sem = BinarySemaphore::new(true);
        sem.reset();
        let sem = Arc::new(sem);
        let waiter = Arc::clone(&sem);
        let handle = thread::spawn(move || {
            waiter.wait();
        });
        thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished());
        sem.post();
        handle.join().unwrap();
    }

    #[test]
    fn test_multiple_posts_coalesce_to_one_wake() {
        let sem = Arc::new(BinarySemaphore::new(false));
        sem.post();
        sem.post();
        sem.post();

        // Exactly one wait should succeed immediately; a second wait on
        // a fresh thread should still block because the flag collapsed
        // to a single pending wake, not three.
        sem.wait();
        let sem2 = Arc::clone(&sem);
        let handle = thread::spawn(move || sem2.wait());
        thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished());
        sem.post();
        handle.join().unwrap();
    }

    #[test]
    fn test_post_all_wakes_every_waiter() {
        let sem = Arc::new(BinarySemaphore::new(false));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let sem = Arc::clone(&sem);
            handles.push(thread::spawn(move || sem.wait()));
        }
        thread::sleep(Duration::from_millis(50));
        sem.post_all();
        for h in handles {
            h.join().unwrap();
        }
    }
}
