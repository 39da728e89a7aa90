//! Mock backend: connection factory, registry, and verification utilities.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use rockpool_core::{Backend, BackendError, BackendResult, ReadyState, Request};
use tracing::debug;

use crate::connection::MockConnection;
use crate::emitter::{Emitter, Subscription};

/// Factory and registry for [`MockConnection`]s.
///
/// Each backend instance is fully isolated: no globals, no shared state, one
/// backend per test. Every created connection is announced on the connection
/// broadcast and recorded, in creation order, in the backend's history.
///
/// # Examples
///
/// ```
/// use rockpool_mock::{MockBackend, Request, Response};
///
/// let backend = MockBackend::new();
/// let _sub = backend.subscribe(|conn| {
///     conn.respond(Response::ok("ok")).expect("first resolution");
/// });
///
/// backend
///     .create_connection(Request::get("https://example.com"))
///     .expect("valid request");
/// assert_eq!(backend.connections().len(), 1);
/// ```
#[derive(Debug)]
pub struct MockBackend {
    /// Broadcast of every connection at the moment of creation. Never closed.
    connections: Emitter<MockConnection>,
    /// Every connection ever created, in creation order. Fed by a listener
    /// on the broadcast, so broadcast and history always agree.
    history: Rc<RefCell<Vec<MockConnection>>>,
    /// Channel intended to carry connections still below the terminal
    /// threshold. Nothing feeds it; see `verify_no_pending_requests`.
    pending: Emitter<MockConnection>,
    /// Count of values observed on `pending` since construction.
    pending_observed: Rc<Cell<usize>>,
}

impl MockBackend {
    /// Create a backend with an empty history.
    pub fn new() -> Self {
        let connections: Emitter<MockConnection> = Emitter::new();
        let history = Rc::new(RefCell::new(Vec::new()));

        // The history is the broadcast's accumulating log: the constructor
        // attaches the listener so nothing can be announced without being
        // recorded.
        let log = Rc::clone(&history);
        drop(connections.subscribe(move |conn: &MockConnection| {
            log.borrow_mut().push(conn.clone());
        }));

        let pending: Emitter<MockConnection> = Emitter::new();
        let pending_observed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pending_observed);
        drop(pending.subscribe(move |_conn: &MockConnection| {
            counter.set(counter.get() + 1);
        }));

        Self {
            connections,
            history,
            pending,
            pending_observed,
        }
    }

    /// Open a mocked connection for `request`.
    ///
    /// The new connection is announced on the connection broadcast before
    /// this returns, so a subscribed harness has already seen (and possibly
    /// resolved) the very handle the caller receives.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidRequest`] when the descriptor carries
    /// an empty or unparseable URL.
    pub fn create_connection(&self, request: Request) -> BackendResult<MockConnection> {
        validate_request(&request)?;

        let connection = MockConnection::new(request);
        debug!(url = %connection.request().url(), "connection created");
        self.connections.emit(&connection);
        Ok(connection)
    }

    /// Subscribe to the connection broadcast.
    ///
    /// Subscribe before calling [`create_connection`](Self::create_connection):
    /// announcements are synchronous and past connections are not replayed
    /// (use [`connections`](Self::connections) for those).
    pub fn subscribe(&self, callback: impl FnMut(&MockConnection) + 'static) -> Subscription {
        self.connections.subscribe(callback)
    }

    /// Snapshot of every connection ever created, in creation order.
    pub fn connections(&self) -> Vec<MockConnection> {
        self.history.borrow().clone()
    }

    /// Assert that no connection is awaiting a resolution from the harness.
    ///
    /// Counts the values observed on the pending channel. The channel is
    /// wired up but nothing feeds it (the reference transport it models left
    /// the state-based feed disabled), so the count is always zero today;
    /// the check and its error path are kept so forgotten mock responses
    /// become detectable the moment the feed exists.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::PendingConnections`] reporting the count when
    /// it is greater than zero.
    pub fn verify_no_pending_requests(&self) -> BackendResult<()> {
        let count = self.pending_observed.get();
        if count > 0 {
            return Err(BackendError::PendingConnections { count });
        }
        Ok(())
    }

    /// Forcibly mark every connection ever created as done.
    ///
    /// Bypasses the respond/error path: ready states jump to
    /// [`ReadyState::Done`] and nothing is published on the connections'
    /// response channels. Use this to silence
    /// [`verify_no_pending_requests`](Self::verify_no_pending_requests) when
    /// outstanding connections are expected and irrelevant to the test.
    pub fn resolve_all_connections(&self) {
        let all = self.connections();
        debug!(count = all.len(), "force-resolving all connections");
        for connection in &all {
            connection.force_resolve();
        }
    }

    /// Connections still below the terminal threshold, in creation order.
    ///
    /// Convenience view over the history; this is the filter the pending
    /// channel was meant to carry.
    pub fn pending_connections(&self) -> Vec<MockConnection> {
        self.history
            .borrow()
            .iter()
            .filter(|c| c.ready_state() < ReadyState::Done)
            .cloned()
            .collect()
    }
}

impl Backend for MockBackend {
    type Connection = MockConnection;

    fn create_connection(&self, request: Request) -> BackendResult<Self::Connection> {
        MockBackend::create_connection(self, request)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject request descriptors a real transport could not even attempt.
fn validate_request(request: &Request) -> BackendResult<()> {
    let url = request.url();
    if url.is_empty() {
        return Err(BackendError::InvalidRequest {
            reason: "empty URL".to_string(),
        });
    }
    if let Err(e) = url.parse::<http::Uri>() {
        return Err(BackendError::InvalidRequest {
            reason: format!("unparseable URL `{url}`: {e}"),
        });
    }
    Ok(())
}
