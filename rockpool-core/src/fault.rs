//! Transport failure values.
//!
//! A [`TransportFault`] is not a raised error: it is the *payload* a backend
//! delivers through a connection's response channel when the simulated
//! exchange fails, the same way a real transport reports a refused or reset
//! connection to the code waiting on the response.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a delivered transport failure.
///
/// The kinds mirror the failures a real TCP-backed transport produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultKind {
    /// The remote end refused the connection.
    ConnectionRefused,
    /// The exchange did not finish in time.
    TimedOut,
    /// The connection was reset mid-exchange.
    Reset,
    /// Anything else.
    Other,
}

/// A failure delivered through a connection's response channel.
///
/// # Examples
///
/// ```
/// use rockpool_core::{FaultKind, TransportFault};
///
/// let fault = TransportFault::new(FaultKind::TimedOut, "no response after 30s");
/// assert_eq!(fault.kind(), FaultKind::TimedOut);
/// assert_eq!(fault.to_string(), "no response after 30s");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct TransportFault {
    kind: FaultKind,
    message: String,
}

impl TransportFault {
    /// Create a fault with an explicit kind.
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a fault of kind [`FaultKind::Other`] from a bare message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Other, message)
    }

    /// The failure category.
    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
