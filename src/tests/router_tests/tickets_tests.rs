// src/tests/router_tests/tickets_tests.rs
use crate::db::tickets::{create_ticket, resolve_ticket};
use crate::router::handle;
use crate::tests::utils::{body_json, test_app, ScriptedClassifier};
use astra::Body;
use http::{Method, Request};

fn get_tickets() -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri("/tickets")
        .body(Body::empty())
        .unwrap()
}

#[test]
fn tickets_are_returned_newest_first() {
    let t = test_app(ScriptedClassifier::failing());
    let ids: Vec<i64> = t
        .app
        .db
        .with_conn(|conn| {
            let a = create_ticket(conn, "Plumbing", "Leak in 2B")?;
            let b = create_ticket(conn, "Electrical", "Sparking socket")?;
            let c = create_ticket(conn, "Cleaning", "Bins overflowing")?;
            resolve_ticket(conn, b)?;
            Ok(vec![a, b, c])
        })
        .unwrap();

    let resp = handle(get_tickets(), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let json = body_json(resp);
    let rows = json.as_array().expect("array");
    let listed: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(listed, vec![ids[2], ids[1], ids[0]]);

    for row in rows {
        for field in ["id", "category", "description", "status", "created_at"] {
            assert!(row.get(field).is_some(), "missing {field}");
        }
    }
    assert_eq!(rows[1]["status"], "Resolved");
    assert_eq!(rows[0]["status"], "Open");
}

#[test]
fn empty_store_is_empty_array() {
    let t = test_app(ScriptedClassifier::failing());
    let json = body_json(handle(get_tickets(), &t.app).unwrap());
    assert_eq!(json, serde_json::json!([]));
}
