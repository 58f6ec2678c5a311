//! Unix pause/resume: a process-wide `SIGUSR1` handler that spins on a
//! per-thread indirection pointer so pause/resume stays scoped to the
//! pool that owns the interrupted worker.

use corrpool_core::{cpdebug, PoolError, Result};
use nix::sys::pthread::{pthread_kill, Pthread};
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

thread_local! {
    /// Set once, in a worker's startup prologue, to this worker's pool's
    /// `on_hold` flag. The signal handler below reads it through a raw
    /// pointer because `thread_local!` access from an `extern "C" fn`
    /// cannot go through `Cell`'s safe API inside a signal context, but
    /// delivery always lands on the thread that owns this cell, so the
    /// read/write pair is not racing any other thread.
    static ON_HOLD_PTR: Cell<*const AtomicBool> = Cell::new(std::ptr::null());
}

/// Grain of the busy-sleep loop the pause handler runs while a worker
/// is held.
const HOLD_POLL_INTERVAL: Duration = Duration::from_secs(1);

extern "C" fn handle_pause(_: i32) {
    let ptr = ON_HOLD_PTR.with(|c| c.get());
    if ptr.is_null() {
        return;
    }
    // Safety: `ptr` was derived from `Arc::as_ptr` on an `Arc<AtomicBool>`
    // kept alive for the worker's entire lifetime by `install`'s caller;
    // the signal only ever runs on the thread that stored it.
    let flag = unsafe { &*ptr };
    flag.store(true, Ordering::SeqCst);
    while flag.load(Ordering::SeqCst) {
        std::thread::sleep(HOLD_POLL_INTERVAL);
    }
}

/// Install the pause handler for the calling thread and remember which
/// pool's `on_hold` flag it should spin on. Called once, from each
/// worker's startup prologue, before the worker reports itself alive.
pub fn install(on_hold: &Arc<AtomicBool>) -> Result<()> {
    ON_HOLD_PTR.with(|c| c.set(Arc::as_ptr(on_hold)));
    let action = SigAction::new(
        SigHandler::Handler(handle_pause),
        SaFlags::empty(),
        SigSet::empty(),
    );
    // Safety: installs a process-wide handler for SIGUSR1; no other
    // component in this crate touches that signal.
    unsafe { signal::sigaction(Signal::SIGUSR1, &action) }
        .map_err(|_| PoolError::UnsupportedPlatform)?;
    cpdebug!("installed SIGUSR1 pause handler");
    Ok(())
}

/// Send the pause signal to one worker thread.
pub fn send_pause(handle: &JoinHandle<()>) -> Result<()> {
    use std::os::unix::thread::JoinHandleExt;
    let tid: Pthread = handle.as_pthread_t();
    pthread_kill(tid, Signal::SIGUSR1).map_err(|_| PoolError::UnsupportedPlatform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_install_then_pause_then_resume() {
        let on_hold = Arc::new(AtomicBool::new(false));
        let on_hold_worker = Arc::clone(&on_hold);
        let ready = Arc::new(AtomicBool::new(false));
        let ready_worker = Arc::clone(&ready);

        let handle = thread::spawn(move || {
            install(&on_hold_worker).unwrap();
            ready_worker.store(true, Ordering::SeqCst);
            while !ready_worker.load(Ordering::SeqCst) {
                thread::yield_now();
            }
            // Park here long enough for the test to pause and resume us.
            thread::sleep(Duration::from_millis(200));
        });

        while !ready.load(Ordering::SeqCst) {
            thread::yield_now();
        }
        send_pause(&handle).unwrap();
        thread::sleep(Duration::from_millis(50));
        assert!(on_hold.load(Ordering::SeqCst));
        on_hold.store(false, Ordering::SeqCst);

        handle.join().unwrap();
    }
}
