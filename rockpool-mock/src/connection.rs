//! Mocked connections.

use std::{cell::RefCell, rc::Rc};

use rockpool_core::{
    BackendError, BackendResult, Connection, ReadyState, Request, Response, TransportFault,
};
use tracing::debug;

use crate::emitter::{ResponseChannel, ResponseEvent, Subscription};

struct ConnectionInner {
    state: ReadyState,
    request: Rc<Request>,
    channel: ResponseChannel,
}

/// One simulated request/response exchange.
///
/// Created by [`MockBackend::create_connection`](crate::MockBackend::create_connection)
/// and handed both to the caller and to broadcast subscribers. Clones share
/// the same underlying connection, so resolving any handle resolves them all.
///
/// The code under test observes the outcome through
/// [`subscribe`](MockConnection::subscribe); the test drives it through
/// [`respond`](MockConnection::respond), [`error`](MockConnection::error), or
/// [`cancel`](MockConnection::cancel).
#[derive(Clone)]
pub struct MockConnection {
    inner: Rc<RefCell<ConnectionInner>>,
}

impl MockConnection {
    /// Create an open connection for `request` with a fresh, empty response
    /// channel. No side effects beyond initialization.
    pub fn new(request: Request) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ConnectionInner {
                state: ReadyState::Open,
                request: Rc::new(request),
                channel: ResponseChannel::new(),
            })),
        }
    }

    /// The request descriptor this connection was opened for.
    ///
    /// The same allocation for the connection's whole lifetime: every handle
    /// and every subscriber sees an identical `Rc`.
    pub fn request(&self) -> Rc<Request> {
        Rc::clone(&self.inner.borrow().request)
    }

    /// Current lifecycle stage.
    pub fn ready_state(&self) -> ReadyState {
        self.inner.borrow().state
    }

    /// Register a callback on the response channel.
    ///
    /// Subscribe before resolving: delivery is synchronous and nothing is
    /// replayed.
    pub fn subscribe(&self, callback: impl FnMut(&ResponseEvent) + 'static) -> Subscription {
        self.inner.borrow().channel.subscribe(callback)
    }

    /// Resolve the exchange successfully.
    ///
    /// Moves the connection to [`ReadyState::Done`], delivers `response` on
    /// the channel, and completes it. Exactly one successful call is
    /// permitted per connection.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::AlreadyResolved`] when the connection already
    /// reached `Done` or `Cancelled`.
    pub fn respond(&self, response: Response) -> BackendResult<()> {
        let channel = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_terminal() {
                return Err(BackendError::AlreadyResolved);
            }
            inner.state = ReadyState::Done;
            debug!(url = %inner.request.url(), "mock connection resolved");
            inner.channel.clone()
        };
        channel.deliver(response);
        Ok(())
    }

    /// Resolve the exchange with a delivered failure.
    ///
    /// Callable regardless of current state, matching real transport
    /// semantics where late errors can land on an abandoned request: the
    /// state becomes [`ReadyState::Done`] unconditionally, even from
    /// `Cancelled`. The fault reaches the channel only if no terminal event
    /// was published before; after a successful [`respond`](Self::respond)
    /// the channel is closed and the publication is dropped.
    pub fn error(&self, fault: TransportFault) {
        let channel = {
            let mut inner = self.inner.borrow_mut();
            inner.state = ReadyState::Done;
            debug!(url = %inner.request.url(), fault = %fault, "mock connection errored");
            inner.channel.clone()
        };
        channel.fail(fault);
    }

    /// Progressive-download notification. Reserved; currently inert.
    ///
    /// Callable for interface compatibility, but it must not move the state
    /// machine or touch the response channel.
    pub fn partial_download(&self, _response: Response) {
        tracing::trace!(
            url = %self.inner.borrow().request.url(),
            "partial download notification ignored"
        );
    }

    /// Abandon the exchange.
    ///
    /// Moves the connection to [`ReadyState::Cancelled`] unless it is already
    /// `Done`; a finished exchange cannot be cancelled. Never touches the
    /// response channel.
    pub fn cancel(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.state != ReadyState::Done {
            inner.state = ReadyState::Cancelled;
            debug!(url = %inner.request.url(), "mock connection cancelled");
        }
    }

    /// Bulk-resolution hook: mark the connection `Done` without publishing
    /// anything on its channel.
    pub(crate) fn force_resolve(&self) {
        self.inner.borrow_mut().state = ReadyState::Done;
    }

    /// Whether two handles refer to the same underlying connection.
    pub fn same_connection(&self, other: &MockConnection) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Connection for MockConnection {
    fn request(&self) -> Rc<Request> {
        MockConnection::request(self)
    }

    fn ready_state(&self) -> ReadyState {
        MockConnection::ready_state(self)
    }

    fn cancel(&self) {
        MockConnection::cancel(self)
    }
}

impl std::fmt::Debug for MockConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MockConnection")
            .field("state", &inner.state)
            .field("url", &inner.request.url())
            .finish()
    }
}
