//! Non-unix fallback: pause/resume has no OS-signal primitive to ride on
//! here, so `install`/`send_pause` are no-ops and `Pool::pause` degrades
//! to toggling `on_hold` directly (workers still observe it cooperatively
//! between jobs, just without the interrupt).

use corrpool_core::Result;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::JoinHandle;

pub fn install(_on_hold: &Arc<AtomicBool>) -> Result<()> {
    Ok(())
}

pub fn send_pause(_handle: &JoinHandle<()>) -> Result<()> {
    Ok(())
}
