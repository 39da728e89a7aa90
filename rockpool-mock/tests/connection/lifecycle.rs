//! Connection state machine behavior.

use rockpool_mock::{
    BackendError, FaultKind, MockConnection, ReadyState, Request, Response, TransportFault,
};

fn open_connection() -> MockConnection {
    MockConnection::new(Request::get("https://example.com/data.json"))
}

#[test]
fn respond_moves_open_to_done() {
    let conn = open_connection();
    conn.respond(Response::ok("payload")).expect("first call");
    assert_eq!(conn.ready_state(), ReadyState::Done);
}

#[test]
fn second_respond_fails() {
    let conn = open_connection();
    conn.respond(Response::ok("first")).expect("first call");

    let err = conn
        .respond(Response::ok("second"))
        .expect_err("second resolution must fail");
    assert_eq!(err, BackendError::AlreadyResolved);
    assert_eq!(err.to_string(), "connection already resolved");
}

#[test]
fn respond_after_cancel_fails() {
    let conn = open_connection();
    conn.cancel();

    let err = conn
        .respond(Response::ok("late"))
        .expect_err("cancelled connections cannot respond");
    assert_eq!(err, BackendError::AlreadyResolved);
    assert_eq!(conn.ready_state(), ReadyState::Cancelled);
}

#[test]
fn cancel_moves_open_to_cancelled() {
    let conn = open_connection();
    conn.cancel();
    assert_eq!(conn.ready_state(), ReadyState::Cancelled);
}

#[test]
fn cancel_is_a_noop_once_done() {
    let conn = open_connection();
    conn.respond(Response::ok("payload")).expect("first call");

    conn.cancel();
    assert_eq!(conn.ready_state(), ReadyState::Done);
}

#[test]
fn cancel_twice_stays_cancelled() {
    let conn = open_connection();
    conn.cancel();
    conn.cancel();
    assert_eq!(conn.ready_state(), ReadyState::Cancelled);
}

#[test]
fn error_moves_open_to_done() {
    let conn = open_connection();
    conn.error(TransportFault::new(FaultKind::TimedOut, "no response"));
    assert_eq!(conn.ready_state(), ReadyState::Done);
}

#[test]
fn error_overrides_cancelled() {
    // A late failure can land on an abandoned request, exactly like a real
    // transport.
    let conn = open_connection();
    conn.cancel();

    conn.error(TransportFault::new(FaultKind::Reset, "reset by peer"));
    assert_eq!(conn.ready_state(), ReadyState::Done);
}

#[test]
fn error_after_respond_does_not_panic() {
    let conn = open_connection();
    conn.respond(Response::ok("payload")).expect("first call");

    conn.error(TransportFault::other("late failure"));
    assert_eq!(conn.ready_state(), ReadyState::Done);
}

#[test]
fn partial_download_is_inert() {
    use std::{cell::RefCell, rc::Rc};

    let conn = open_connection();
    let events = Rc::new(RefCell::new(Vec::new()));

    let sink = events.clone();
    let _sub = conn.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    conn.partial_download(Response::ok("chunk"));

    assert_eq!(conn.ready_state(), ReadyState::Open);
    assert!(events.borrow().is_empty());

    // The connection is still resolvable afterwards.
    conn.respond(Response::ok("payload")).expect("still open");
}
