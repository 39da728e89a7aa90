//! Response channel delivery, end to end.

use std::{cell::RefCell, rc::Rc};

use rockpool_mock::{
    FaultKind, MockBackend, Request, Response, ResponseEvent, TransportFault,
};
use tracing::Level;

fn record_events(
    conn: &rockpool_mock::MockConnection,
) -> (Rc<RefCell<Vec<ResponseEvent>>>, rockpool_mock::Subscription) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let sub = conn.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    (events, sub)
}

#[test]
fn respond_delivers_the_body_then_completes() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .try_init();

    let backend = MockBackend::new();
    let conn = backend
        .create_connection(Request::get("https://example.com/data.json"))
        .expect("valid request");

    let (events, _sub) = record_events(&conn);
    conn.respond(Response::ok("awesome")).expect("first call");

    let events = events.borrow();
    assert_eq!(events.len(), 2, "exactly one value and one completion");
    match &events[0] {
        ResponseEvent::Response(res) => assert_eq!(res.text(), Some("awesome")),
        other => panic!("expected a response, got {other:?}"),
    }
    assert_eq!(events[1], ResponseEvent::Complete);
}

#[test]
fn nothing_follows_completion() {
    let backend = MockBackend::new();
    let conn = backend
        .create_connection(Request::get("https://example.com/data.json"))
        .expect("valid request");

    let (events, _sub) = record_events(&conn);
    conn.respond(Response::ok("awesome")).expect("first call");
    conn.error(TransportFault::other("late"));

    assert_eq!(events.borrow().len(), 2);
}

#[test]
fn error_delivers_the_fault_alone() {
    let backend = MockBackend::new();
    let conn = backend
        .create_connection(Request::get("https://example.com/data.json"))
        .expect("valid request");

    let (events, _sub) = record_events(&conn);
    conn.error(TransportFault::new(FaultKind::ConnectionRefused, "refused"));

    let events = events.borrow();
    assert_eq!(events.len(), 1, "an error terminates the stream by itself");
    match &events[0] {
        ResponseEvent::Failed(fault) => {
            assert_eq!(fault.kind(), FaultKind::ConnectionRefused);
            assert_eq!(fault.message(), "refused");
        }
        other => panic!("expected a fault, got {other:?}"),
    }
}

#[test]
fn late_channel_subscriber_sees_nothing() {
    let backend = MockBackend::new();
    let conn = backend
        .create_connection(Request::get("https://example.com/data.json"))
        .expect("valid request");

    conn.respond(Response::ok("awesome")).expect("first call");

    let (events, _sub) = record_events(&conn);
    assert!(events.borrow().is_empty());
}

#[test]
fn json_bodies_decode_on_arrival() {
    let backend = MockBackend::new();
    let conn = backend
        .create_connection(Request::get("https://example.com/data.json"))
        .expect("valid request");

    let decoded = Rc::new(RefCell::new(None));
    let sink = decoded.clone();
    let _sub = conn.subscribe(move |e| {
        if let ResponseEvent::Response(res) = e {
            let value: serde_json::Value = res.json().expect("decode body");
            *sink.borrow_mut() = Some(value);
        }
    });

    conn.respond(Response::ok(r#"{"name":"awesome"}"#))
        .expect("first call");

    let decoded = decoded.borrow();
    let value = decoded.as_ref().expect("subscriber ran");
    assert_eq!(value["name"], "awesome");
}

#[test]
fn harness_resolves_from_the_broadcast() {
    // The full loop: code under test opens a connection and watches its
    // channel; the harness, subscribed to the backend, supplies the answer.
    let backend = MockBackend::new();

    let _driver = backend.subscribe(|conn| {
        let res = Response::ok("awesome").with_url(conn.request().url());
        conn.respond(res).expect("first resolution");
    });

    let conn = backend
        .create_connection(Request::get("https://example.com/data.json"))
        .expect("valid request");

    // By the time create_connection returns, the harness already resolved it.
    assert!(conn.ready_state().is_terminal());

    let (events, _sub) = record_events(&conn);
    assert!(
        events.borrow().is_empty(),
        "resolution happened before this subscription"
    );
}
