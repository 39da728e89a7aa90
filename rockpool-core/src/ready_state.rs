//! Connection lifecycle states.
//!
//! A connection moves forward through the numbered stages and stops at a
//! terminal one. [`ReadyState::Done`] is the normal endpoint;
//! [`ReadyState::Cancelled`] is a distinguished terminal reached only by
//! cancellation, never by the forward progression itself.

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a single connection.
///
/// The discriminants are ordered so "still in flight" is expressible as a
/// comparison: a connection is pending while `state < ReadyState::Done`.
///
/// # Examples
///
/// ```
/// use rockpool_core::ReadyState;
///
/// assert!(ReadyState::Open < ReadyState::Done);
/// assert!(!ReadyState::Loading.is_terminal());
/// assert!(ReadyState::Cancelled.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReadyState {
    /// Created but not yet opened by a backend.
    Unsent = 0,
    /// Opened and waiting for a response. Initial state of a mock connection.
    Open = 1,
    /// Response headers have arrived, body still outstanding.
    HeadersReceived = 2,
    /// Response body is being received.
    Loading = 3,
    /// The exchange finished, successfully or with a delivered fault.
    Done = 4,
    /// The caller abandoned the exchange before it finished.
    Cancelled = 5,
}

impl ReadyState {
    /// Whether this state admits no further progression.
    pub const fn is_terminal(self) -> bool {
        matches!(self, ReadyState::Done | ReadyState::Cancelled)
    }
}
