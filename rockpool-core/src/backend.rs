//! Backend trait seam.
//!
//! Trait-based transport that allows seamless swapping between a real
//! backend and the mock for testing. Code under test is written against
//! [`Backend`]; which implementation it gets is the harness's choice.

use std::rc::Rc;

use crate::{BackendResult, ReadyState, Request};

/// Factory for connections.
///
/// Single-threaded design - no Send bounds needed. Callers hold the backend
/// for the duration of one test and issue every request through it.
pub trait Backend {
    /// The connection type this backend produces.
    type Connection: Connection;

    /// Open a connection for the given request descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidRequest`](crate::BackendError::InvalidRequest)
    /// when the descriptor is rejected.
    fn create_connection(&self, request: Request) -> BackendResult<Self::Connection>;
}

/// One request/response exchange in flight.
///
/// Only the operations a *caller* needs appear here. Harness-only resolution
/// methods belong to the concrete mock type, since a real backend resolves
/// its connections from the wire, not from test code.
pub trait Connection {
    /// The request descriptor this connection was opened for.
    fn request(&self) -> Rc<Request>;

    /// Current lifecycle stage.
    fn ready_state(&self) -> ReadyState;

    /// Abandon the exchange. No-op once the connection is done.
    fn cancel(&self);
}
