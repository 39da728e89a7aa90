//! # rockpool-core
//!
//! The transport contract shared by real and mock backends.
//!
//! This crate defines everything a caller needs to issue HTTP-like requests
//! through a swappable backend, without saying anything about how the backend
//! resolves them:
//!
//! - **Backend traits**: [`Backend`] and [`Connection`] - the seam that makes
//!   a mock transport substitutable for a real one
//! - **Lifecycle states**: [`ReadyState`] - the ordered stages a connection
//!   moves through
//! - **Value types**: [`Request`] and [`Response`] - thin HTTP-shaped
//!   descriptors with body accessors
//! - **Failure values**: [`TransportFault`] - errors a transport *delivers*,
//!   as opposed to errors it *raises* ([`BackendError`])
//!
//! ## Raised vs. delivered errors
//!
//! [`BackendError`] is raised through `Result` when the caller violates the
//! contract (resolving a finished connection, handing over a malformed
//! request). [`TransportFault`] is plain data flowing through a connection's
//! response channel, the way a real transport reports a refused or reset
//! connection to whoever is waiting on the response.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

mod backend;
mod error;
mod fault;
mod ready_state;
mod request;
mod response;

// Trait seam exports
pub use backend::{Backend, Connection};

// Error exports
pub use error::{BackendError, BackendResult};

// Value type exports
pub use fault::{FaultKind, TransportFault};
pub use ready_state::ReadyState;
pub use request::Request;
pub use response::{BodyError, Response};
