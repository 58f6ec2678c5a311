//! Pool configuration.
//!
//! Provides compile-time defaults with runtime environment overrides.
//!
//! # Configuration Priority (highest wins)
//!
//! 1. Environment variables (runtime)
//! 2. Library defaults
//!
//! # Example
//!
//! ```
//! use corrpool_runtime::config::Config;
//!
//! let config = Config::from_env()
//!     .num_workers(8)
//!     .worker_yield(false);
//! ```

pub mod defaults;

use corrpool_core::env::{env_get, env_get_bool};
use corrpool_core::log::LogLevel;
use corrpool_core::PoolError;
use std::time::Duration;

/// Pool configuration, built either from compile-time defaults
/// (`Config::new`) or with environment overrides applied
/// (`Config::from_env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of worker threads to spawn.
    pub num_workers: usize,
    /// Length above which the queue logs one warning per crossing.
    pub max_queue_size_without_warning: usize,
    /// Total time `Pool::new` will poll for all workers to start.
    pub startup_timeout: Duration,
    /// Poll interval used while waiting for workers to start.
    pub startup_poll_interval: Duration,
    /// Whether workers yield the OS thread after finishing a job.
    pub worker_yield: bool,
    /// Soft-phase budget for `destroy`'s bounded shutdown wait.
    pub destroy_soft_phase: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Config {
    /// Compile-time defaults with environment overrides applied.
    ///
    /// Environment variables (all optional):
    /// - `CORRPOOL_NUM_WORKERS`
    /// - `CORRPOOL_MAX_QUEUE_SIZE_WITHOUT_WARNING`
    /// - `CORRPOOL_STARTUP_TIMEOUT_NS`
    /// - `CORRPOOL_STARTUP_POLL_INTERVAL_NS`
    /// - `CORRPOOL_WORKER_YIELD` (0/1)
    /// - `CORRPOOL_DESTROY_SOFT_PHASE_MS`
    /// - `CORRPOOL_LOG_LEVEL` (consumed directly by `corrpool_core::log`)
    pub fn from_env() -> Self {
        Self {
            num_workers: env_get("CORRPOOL_NUM_WORKERS", defaults::NUM_WORKERS),
            max_queue_size_without_warning: env_get(
                "CORRPOOL_MAX_QUEUE_SIZE_WITHOUT_WARNING",
                defaults::MAX_QUEUE_SIZE_WITHOUT_WARNING,
            ),
            startup_timeout: Duration::from_nanos(env_get(
                "CORRPOOL_STARTUP_TIMEOUT_NS",
                defaults::STARTUP_TIMEOUT_NS,
            )),
            startup_poll_interval: Duration::from_nanos(env_get(
                "CORRPOOL_STARTUP_POLL_INTERVAL_NS",
                defaults::STARTUP_POLL_INTERVAL_NS,
            )),
            worker_yield: env_get_bool("CORRPOOL_WORKER_YIELD", defaults::WORKER_YIELD),
            destroy_soft_phase: Duration::from_millis(env_get(
                "CORRPOOL_DESTROY_SOFT_PHASE_MS",
                defaults::DESTROY_SOFT_PHASE_MS,
            )),
        }
    }

    /// Compile-time defaults, ignoring the environment. Useful for tests
    /// that want full, reproducible control.
    pub fn new() -> Self {
        Self {
            num_workers: defaults::NUM_WORKERS,
            max_queue_size_without_warning: defaults::MAX_QUEUE_SIZE_WITHOUT_WARNING,
            startup_timeout: Duration::from_nanos(defaults::STARTUP_TIMEOUT_NS),
            startup_poll_interval: Duration::from_nanos(defaults::STARTUP_POLL_INTERVAL_NS),
            worker_yield: defaults::WORKER_YIELD,
            destroy_soft_phase: Duration::from_millis(defaults::DESTROY_SOFT_PHASE_MS),
        }
    }

    /// Reject configurations that can never make progress. Unlike the
    /// teacher's `SchedulerConfig::validate` this does not reject
    /// `num_workers == 0` — a zero-worker pool is valid, specified
    /// behaviour here (see distilled spec scenario 4: `add_work`
    /// succeeds, nothing ever completes).
    pub fn validate(&self) -> corrpool_core::Result<()> {
        if self.startup_poll_interval.is_zero() {
            return Err(PoolError::InvalidArgument);
        }
        if self.startup_timeout.is_zero() && self.num_workers > 0 {
            return Err(PoolError::InvalidArgument);
        }
        Ok(())
    }

    // Builder methods.

    pub fn num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    pub fn max_queue_size_without_warning(mut self, n: usize) -> Self {
        self.max_queue_size_without_warning = n;
        self
    }

    pub fn startup_timeout(mut self, d: Duration) -> Self {
        self.startup_timeout = d;
        self
    }

    pub fn startup_poll_interval(mut self, d: Duration) -> Self {
        self.startup_poll_interval = d;
        self
    }

    pub fn worker_yield(mut self, enable: bool) -> Self {
        self.worker_yield = enable;
        self
    }

    pub fn destroy_soft_phase(mut self, d: Duration) -> Self {
        self.destroy_soft_phase = d;
        self
    }

    /// Set the process-wide log level (a thin wrapper over
    /// `corrpool_core::log::set_log_level` for callers configuring
    /// everything through one `Config`).
    pub fn log_level(self, level: LogLevel) -> Self {
        corrpool_core::log::set_log_level(level);
        self
    }

    /// Print the resolved configuration to stderr (for debugging).
    pub fn print(&self) {
        eprintln!("corrpool Configuration:");
        eprintln!("  num_workers:                      {}", self.num_workers);
        eprintln!(
            "  max_queue_size_without_warning:   {}",
            self.max_queue_size_without_warning
        );
        eprintln!("  startup_timeout:                  {:?}", self.startup_timeout);
        eprintln!("  startup_poll_interval:            {:?}", self.startup_poll_interval);
        eprintln!("  worker_yield:                     {}", self.worker_yield);
        eprintln!("  destroy_soft_phase:               {:?}", self.destroy_soft_phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matches_defaults() {
        let c = Config::new();
        assert_eq!(c.num_workers, defaults::NUM_WORKERS);
        assert_eq!(
            c.max_queue_size_without_warning,
            defaults::MAX_QUEUE_SIZE_WITHOUT_WARNING
        );
        assert!(c.worker_yield);
    }

    #[test]
    fn test_builder_overrides() {
        let c = Config::new().num_workers(16).worker_yield(false);
        assert_eq!(c.num_workers, 16);
        assert!(!c.worker_yield);
    }

    #[test]
    fn test_from_env_override() {
        std::env::set_var("CORRPOOL_NUM_WORKERS", "9");
        let c = Config::from_env();
        assert_eq!(c.num_workers, 9);
        std::env::remove_var("CORRPOOL_NUM_WORKERS");
    }

    #[test]
    fn test_validate_accepts_zero_workers() {
        let c = Config::new().num_workers(0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_poll_interval() {
        let c = Config::new().startup_poll_interval(Duration::ZERO);
        assert_eq!(c.validate(), Err(corrpool_core::PoolError::InvalidArgument));
    }
}
