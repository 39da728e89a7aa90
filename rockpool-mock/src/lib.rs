//! # rockpool-mock
//!
//! A mock transport backend for testing HTTP-like clients without real I/O.
//!
//! Code under test issues requests through the [`Backend`] trait from
//! `rockpool-core`. In tests, the backend is a [`MockBackend`]: every request
//! becomes a [`MockConnection`] announced on the backend's connection
//! broadcast, and the test drives the outcome by calling
//! [`respond`](MockConnection::respond), [`error`](MockConnection::error), or
//! [`cancel`](MockConnection::cancel) on it. The code under test observes the
//! connection's response channel exactly as it would observe a real
//! transport.
//!
//! ## Core pieces
//!
//! - [`MockBackend`]: factory and registry for mocked connections
//! - [`MockConnection`]: one simulated request/response exchange
//! - [`Emitter`]: the synchronous multicast channel both are built on
//!
//! ## Quick start
//!
//! ```
//! use rockpool_mock::{MockBackend, Request, Response};
//!
//! let backend = MockBackend::new();
//!
//! // The harness reacts to every connection the code under test opens.
//! let _sub = backend.subscribe(|conn| {
//!     conn.respond(Response::ok("awesome")).expect("first resolution");
//! });
//!
//! let conn = backend
//!     .create_connection(Request::get("https://example.com/data.json"))
//!     .expect("valid request");
//!
//! assert!(conn.ready_state().is_terminal());
//! ```
//!
//! ## Execution model
//!
//! Everything is single-threaded and synchronous: publications reach the
//! subscribers registered at the moment of the call, in registration order,
//! with no queuing. Subscribe before triggering an event or you will miss
//! it: only the backend's connection history replays the past, and it is an
//! accumulating log, not a channel.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

mod backend;
mod connection;
mod emitter;

pub use backend::MockBackend;
pub use connection::MockConnection;
pub use emitter::{Emitter, ResponseChannel, ResponseEvent, Subscription};

// Re-export the contract types tests need alongside the mock.
pub use rockpool_core::{
    Backend, BackendError, BackendResult, BodyError, Connection, FaultKind, ReadyState, Request,
    Response, TransportFault,
};
