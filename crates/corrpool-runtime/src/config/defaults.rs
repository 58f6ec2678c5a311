//! Compile-time defaults, overridable at runtime via `CORRPOOL_*`
//! environment variables (see [`super::Config::from_env`]).

/// Default worker count when none is requested explicitly.
pub const NUM_WORKERS: usize = 4;

/// Queue length above which a push/pull emits one warning per crossing.
pub const MAX_QUEUE_SIZE_WITHOUT_WARNING: usize = 100;

/// Upper bound, in nanoseconds, on how long `Pool::new` polls for all
/// workers to report alive before giving up with `StartupTimeout`.
pub const STARTUP_TIMEOUT_NS: u64 = 10_000_000_000; // 10s

/// Interval, in nanoseconds, between `num_threads_alive` polls in
/// `Pool::new`.
pub const STARTUP_POLL_INTERVAL_NS: u64 = 100;

/// Whether workers call `std::thread::yield_now()` after each job.
pub const WORKER_YIELD: bool = true;

/// Wall-clock budget, in milliseconds, for `destroy`'s soft shutdown
/// phase (broadcast + check) before falling back to the unbounded hard
/// phase.
pub const DESTROY_SOFT_PHASE_MS: u64 = 1_000;
