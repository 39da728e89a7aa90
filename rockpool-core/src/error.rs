//! Errors raised by backend operations.

use thiserror::Error;

/// Errors a backend raises to its immediate caller.
///
/// These signal contract violations by the calling code, usually a test
/// authoring bug. They are never recovered internally: no retry, no
/// suppression, no logging layer between the violation and the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// A resolution method was called on a connection that already reached a
    /// terminal state.
    #[error("connection already resolved")]
    AlreadyResolved,
    /// Verification found connections that were created but never resolved.
    #[error("{count} pending connection(s) not yet resolved")]
    PendingConnections {
        /// How many connections are still below the terminal threshold.
        count: usize,
    },
    /// A request descriptor was rejected before a connection was created.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the descriptor, naming the offending value.
        reason: String,
    },
}

/// A type alias for `Result<T, BackendError>`.
pub type BackendResult<T> = Result<T, BackendError>;
