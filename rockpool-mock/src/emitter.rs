//! Synchronous multicast channels.
//!
//! An [`Emitter`] is an explicit list of registered callbacks, invoked in
//! registration order at the moment of each publication. There is no queue
//! and no replay: a subscriber only observes values emitted after it
//! subscribed. This is the delivery model for both the backend's connection
//! broadcast and each connection's [`ResponseChannel`].
//!
//! Single-threaded design - no Send bounds, no locking. Callbacks must not
//! publish to (or subscribe to) the emitter currently delivering to them;
//! doing so is a reentrant borrow and panics.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use rockpool_core::{Response, TransportFault};

struct Entry<T> {
    id: u64,
    callback: Box<dyn FnMut(&T)>,
}

struct EmitterInner<T> {
    next_id: u64,
    subscribers: Vec<Entry<T>>,
}

/// A synchronous multicast channel.
///
/// Cloning an emitter produces another handle to the same subscriber list,
/// so a publisher and its subscribers can hold the channel independently.
///
/// # Examples
///
/// ```
/// use rockpool_mock::Emitter;
/// use std::{cell::RefCell, rc::Rc};
///
/// let emitter: Emitter<u32> = Emitter::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = seen.clone();
/// let _sub = emitter.subscribe(move |v| sink.borrow_mut().push(*v));
///
/// emitter.emit(&1);
/// emitter.emit(&2);
/// assert_eq!(*seen.borrow(), vec![1, 2]);
/// ```
pub struct Emitter<T> {
    inner: Rc<RefCell<EmitterInner<T>>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("subscribers", &self.inner.borrow().subscribers.len())
            .finish()
    }
}

impl<T: 'static> Emitter<T> {
    /// Create an emitter with no subscribers.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(EmitterInner {
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Register a callback, invoked synchronously for every subsequent
    /// emission until the returned [`Subscription`] is unsubscribed.
    ///
    /// Dropping the handle does NOT unsubscribe; the registration stays
    /// active for the emitter's lifetime unless
    /// [`Subscription::unsubscribe`] is called.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push(Entry {
                id,
                callback: Box::new(callback),
            });
            id
        };

        let weak: Weak<RefCell<EmitterInner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.retain(|e| e.id != id);
                }
            })),
        }
    }

    /// Deliver `value` to every currently-registered subscriber, in
    /// registration order. Subscribers registered after this call observe
    /// nothing.
    pub fn emit(&self, value: &T) {
        let mut inner = self.inner.borrow_mut();
        tracing::trace!(subscribers = inner.subscribers.len(), "emitting value");
        for entry in inner.subscribers.iter_mut() {
            (entry.callback)(value);
        }
    }

    /// Number of currently-registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for a registered callback.
///
/// Unsubscription is explicit: dropping the handle leaves the callback
/// registered. This keeps `let _ = emitter.subscribe(...)` working the way
/// test harnesses expect.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the callback from its emitter. Safe to call after the emitter
    /// is gone.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// One notification on a connection's response channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEvent {
    /// The single success value of the exchange.
    Response(Response),
    /// The exchange failed; terminal on its own, no [`Complete`](Self::Complete)
    /// follows.
    Failed(TransportFault),
    /// Normal completion marker, emitted exactly once after a success value.
    Complete,
}

/// Per-connection notification stream for the eventual response.
///
/// The channel delivers exactly one terminal outcome: a response followed by
/// [`ResponseEvent::Complete`], or a [`ResponseEvent::Failed`] on its own.
/// After that it is closed and further publications are dropped, mirroring a
/// stopped stream. Clones share the same underlying channel.
#[derive(Debug, Clone)]
pub struct ResponseChannel {
    events: Emitter<ResponseEvent>,
    closed: Rc<Cell<bool>>,
}

impl ResponseChannel {
    /// Create an open channel with no subscribers.
    pub fn new() -> Self {
        Self {
            events: Emitter::new(),
            closed: Rc::new(Cell::new(false)),
        }
    }

    /// Register a callback for the channel's events.
    ///
    /// Same delivery rules as [`Emitter::subscribe`]: synchronous, in
    /// registration order, no replay of anything already delivered.
    pub fn subscribe(&self, callback: impl FnMut(&ResponseEvent) + 'static) -> Subscription {
        self.events.subscribe(callback)
    }

    /// Whether a terminal event has already been published.
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Publish the success value, signal completion, and close.
    pub(crate) fn deliver(&self, response: Response) {
        if self.closed.get() {
            tracing::trace!("response dropped: channel already closed");
            return;
        }
        self.events.emit(&ResponseEvent::Response(response));
        self.events.emit(&ResponseEvent::Complete);
        self.closed.set(true);
    }

    /// Publish the error signal and close. No completion marker follows.
    pub(crate) fn fail(&self, fault: TransportFault) {
        if self.closed.get() {
            tracing::trace!("fault dropped: channel already closed");
            return;
        }
        self.events.emit(&ResponseEvent::Failed(fault));
        self.closed.set(true);
    }
}

impl Default for ResponseChannel {
    fn default() -> Self {
        Self::new()
    }
}
