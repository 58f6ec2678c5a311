//! # corrpool-core
//!
//! Core types for the corrpool worker pool.
//!
//! This crate is platform-agnostic: it contains the job, the job queue,
//! the coalescing binary semaphore, the error taxonomy, logging macros
//! and environment-variable helpers. All OS-thread / signal handling
//! lives in `corrpool-runtime`.
//!
//! ## Modules
//!
//! - `id` - job identifier newtype
//! - `job` - the unit of work and of result
//! - `sem` - coalescing binary semaphore
//! - `queue` - the FIFO / searchable job queue
//! - `error` - error types
//! - `log` - leveled stderr diagnostics
//! - `env` - environment variable utilities

pub mod env;
pub mod error;
pub mod id;
pub mod job;
pub mod log;
pub mod queue;
pub mod sem;

pub use error::{PoolError, Result};
pub use id::JobId;
pub use job::Job;
pub use queue::JobQueue;
pub use sem::BinarySemaphore;
