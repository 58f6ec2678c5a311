//! # corrpool-runtime
//!
//! The platform-specific half of the corrpool worker pool: OS thread
//! spawning, the worker loop, pause/resume signal plumbing, and the
//! pool's running state and teardown sequence.
//!
//! Platform-agnostic types (the job, the queue, the semaphore, errors,
//! logging) live in `corrpool-core` and are re-exported here for
//! convenience.
//!
//! ## Modules
//!
//! - `config` - compile-time defaults with `CORRPOOL_*` environment overrides
//! - `signal` - pause/resume signal handling (unix via `nix`, portable fallback elsewhere)
//! - `worker` - the worker thread's loop
//! - `pool` - `PoolInner`: spawns, running state, quiescence, teardown

pub mod config;
pub mod pool;
pub mod signal;
pub mod worker;

pub use config::Config;
pub use pool::PoolInner;
