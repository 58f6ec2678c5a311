//! Error types for the corrpool worker pool.

use core::fmt;

/// Result type for pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors that can occur in pool operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Allocation failure during `init` or `add_work`.
    OutOfMemory,

    /// Workers did not all report alive within the startup budget.
    StartupTimeout,

    /// `find_result` exhausted its retry budget without a match.
    NotFound,

    /// Argument outside the accepted range. Reserved for constructors
    /// that take a bounded value; worker-count clamping stays silent.
    InvalidArgument,

    /// The requested platform primitive (thread naming, pause/resume
    /// signal) is unavailable on this target.
    UnsupportedPlatform,

    /// The pool has already been torn down.
    AlreadyDestroyed,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::OutOfMemory => write!(f, "allocation failed"),
            PoolError::StartupTimeout => write!(f, "workers did not start within the startup budget"),
            PoolError::NotFound => write!(f, "no result found for identifier"),
            PoolError::InvalidArgument => write!(f, "argument out of range"),
            PoolError::UnsupportedPlatform => write!(f, "platform primitive unavailable"),
            PoolError::AlreadyDestroyed => write!(f, "pool already destroyed"),
        }
    }
}

impl std::error::Error for PoolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = PoolError::NotFound;
        assert_eq!(format!("{}", e), "no result found for identifier");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(PoolError::OutOfMemory, PoolError::OutOfMemory);
        assert_ne!(PoolError::OutOfMemory, PoolError::NotFound);
    }
}
