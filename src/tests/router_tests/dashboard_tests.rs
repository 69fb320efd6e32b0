// src/tests/router_tests/dashboard_tests.rs
use crate::db::tickets::{create_ticket, get_ticket};
use crate::domain::TicketStatus;
use crate::router::handle;
use crate::tests::utils::{body_string, test_app, ScriptedClassifier};
use astra::Body;
use http::{Method, Request};

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn liveness_names_the_model() {
    let t = test_app(ScriptedClassifier::failing());
    let resp = handle(request(Method::GET, "/"), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(resp), "Server Running (Model: scripted-model)");
}

#[test]
fn dashboard_lists_tickets_with_resolve_forms() {
    let t = test_app(ScriptedClassifier::failing());
    let id = t
        .app
        .db
        .with_conn(|conn| create_ticket(conn, "Cleaning", "Stairwell <b>dirty</b>"))
        .unwrap();

    let resp = handle(request(Method::GET, "/dashboard"), &t.app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Cleaning"));
    assert!(body.contains(&format!("action=\"/resolve/{id}\"")));
    // Descriptions are escaped.
    assert!(body.contains("Stairwell &lt;b&gt;dirty&lt;/b&gt;"));
}

#[test]
fn empty_dashboard_says_so() {
    let t = test_app(ScriptedClassifier::failing());
    let body = body_string(handle(request(Method::GET, "/dashboard"), &t.app).unwrap());
    assert!(body.contains("No tickets yet."));
}

#[test]
fn resolve_redirects_and_is_idempotent() {
    let t = test_app(ScriptedClassifier::failing());
    let id = t
        .app
        .db
        .with_conn(|conn| create_ticket(conn, "Security", "Gate left open"))
        .unwrap();

    for _ in 0..2 {
        let resp = handle(request(Method::POST, &format!("/resolve/{id}")), &t.app)
            .expect("Handler failed");
        assert_eq!(resp.status(), 302);
        assert_eq!(
            resp.headers().get("Location").unwrap().to_str().unwrap(),
            "/dashboard"
        );
    }

    let ticket = t
        .app
        .db
        .with_conn(|conn| get_ticket(conn, id))
        .unwrap()
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Resolved);

    let body = body_string(handle(request(Method::GET, "/dashboard"), &t.app).unwrap());
    assert!(!body.contains(&format!("action=\"/resolve/{id}\"")));
}

#[test]
fn resolve_unknown_ticket_still_redirects() {
    let t = test_app(ScriptedClassifier::failing());
    let resp = handle(request(Method::POST, "/resolve/4242"), &t.app).unwrap();
    assert_eq!(resp.status(), 302);
}

#[test]
fn resolve_with_bad_id_is_404() {
    let t = test_app(ScriptedClassifier::failing());
    let err = handle(request(Method::POST, "/resolve/abc"), &t.app).err().expect("expected an error");
    assert_eq!(err.status_code(), 404);
}

#[test]
fn unknown_path_is_404() {
    let t = test_app(ScriptedClassifier::failing());
    let err = handle(request(Method::GET, "/nope"), &t.app).err().expect("expected an error");
    assert_eq!(err.status_code(), 404);
}
