//! Pause/resume signal plumbing.
//!
//! Each worker installs a `SIGUSR1` handler once, in its startup
//! prologue. `Pool::pause` sends that signal to every alive worker;
//! the handler busy-sleeps at 1s granularity while the pool's shared
//! `on_hold` flag is set. `Pool::resume` simply
//! clears the flag — no signal is needed to wake a worker back up.
//!
//! The OS-level handler registration is necessarily process-wide (only
//! one handler may be registered per signal number), but *which* flag a
//! given worker spins on is resolved through a thread-local set during
//! that worker's prologue, so two independently-constructed pools do not
//! observe each other's pause/resume calls — this is how this crate
//! keeps pause/resume scoped per-pool
//! despite signals themselves being a process-wide primitive.

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod unix;
        pub use unix::*;
    } else {
        mod fallback;
        pub use fallback::*;
    }
}
