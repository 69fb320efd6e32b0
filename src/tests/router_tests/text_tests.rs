// src/tests/router_tests/text_tests.rs
use crate::domain::TicketStatus;
use crate::privacy::ClassifyMode;
use crate::router::handle;
use crate::tests::utils::{ai_response, body_json, test_app, test_app_with_mode, ScriptedClassifier};
use astra::Body;
use http::{Method, Request};
use std::sync::atomic::Ordering;

const PLUMBING_REPLY: &str = "```json\n{\"intent\": \"complaint\", \"category\": \"Plumbing\", \"text\": \"Issue: Tap is leaking in kitchen\"}\n```";

const LABELS: &[&str] = &[
    "Plumbing",
    "Electrical",
    "Security",
    "Cleaning",
    "General",
    "Maintenance",
];

fn post_text(json: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/upload_text")
        .header("Content-Type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

#[test]
fn call_request_is_private_and_not_stored() {
    let t = test_app(ScriptedClassifier::replying(PLUMBING_REPLY));

    let resp = handle(post_text(r#"{"text": "Call 101"}"#), &t.app).expect("handler failed");
    assert_eq!(resp.status(), 200);

    let envelope = body_json(resp);
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["message"], "Processed");

    let ai = ai_response(&envelope);
    assert_eq!(ai["intent"], "private");
    assert_eq!(ai["target"], "101");
    assert_eq!(ai["action"], "call");

    assert!(t.tickets().is_empty(), "private request must not create a ticket");
    assert_eq!(t.text_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn leaking_tap_creates_one_open_ticket() {
    let t = test_app(ScriptedClassifier::replying(PLUMBING_REPLY));

    let resp = handle(post_text(r#"{"text": "Tap is leaking in kitchen"}"#), &t.app).unwrap();
    assert_eq!(resp.status(), 200);

    let ai = ai_response(&body_json(resp));
    assert_eq!(ai["intent"], "complaint");
    assert!(ai.get("action").is_none());

    let tickets = t.tickets();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].status, TicketStatus::Open);
    assert!(LABELS.contains(&tickets[0].category.as_str()));
    assert_eq!(tickets[0].description, "Issue: Tap is leaking in kitchen");
}

#[test]
fn classifier_failure_files_general_complaint_with_raw_text() {
    let t = test_app(ScriptedClassifier::failing());

    let resp = handle(post_text(r#"{"text": "Lift is stuck on floor 4"}"#), &t.app).unwrap();
    assert_eq!(resp.status(), 200);

    let tickets = t.tickets();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].category, "General");
    assert_eq!(tickets[0].description, "Lift is stuck on floor 4");
}

#[test]
fn malformed_reply_files_general_complaint() {
    let t = test_app(ScriptedClassifier::replying("Sorry, I cannot help with that."));

    handle(post_text(r#"{"text": "Broken glass near the gate"}"#), &t.app).unwrap();

    let tickets = t.tickets();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].category, "General");
    assert_eq!(tickets[0].description, "Broken glass near the gate");
}

#[test]
fn trigger_words_never_create_tickets_even_when_model_fails() {
    for mode in [ClassifyMode::Keyword, ClassifyMode::Model] {
        let t = test_app_with_mode(ScriptedClassifier::failing(), mode);
        for text in [
            "please phone the watchman",
            "Message flat 202",
            "connect me to the office",
            "I want to talk to 305",
        ] {
            let body = serde_json::json!({ "text": text }).to_string();
            let resp = handle(post_text(&body), &t.app).unwrap();
            assert_eq!(resp.status(), 200);
        }
        assert!(t.tickets().is_empty(), "mode {mode}: private input stored");
    }
}

#[test]
fn model_mode_private_reply_is_not_stored() {
    let reply = r#"{"intent": "private", "category": "Private", "text": "Buzz flat 3", "action": "call", "target": "3"}"#;
    let t = test_app_with_mode(ScriptedClassifier::replying(reply), ClassifyMode::Model);

    let resp = handle(post_text(r#"{"text": "buzz flat 3"}"#), &t.app).unwrap();
    let ai = ai_response(&body_json(resp));
    assert_eq!(ai["intent"], "private");
    assert!(t.tickets().is_empty());
}

#[test]
fn missing_or_blank_text_is_400() {
    let t = test_app(ScriptedClassifier::replying(PLUMBING_REPLY));

    for body in [r#"{}"#, r#"{"text": "   "}"#, "not json", r#"{"text": 5}"#] {
        let resp = handle(post_text(body), &t.app).unwrap();
        assert_eq!(resp.status(), 400, "body {body:?}");
        let envelope = body_json(resp);
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["message"], "No text provided");
    }
    assert!(t.tickets().is_empty());
}

#[test]
fn oversized_text_body_is_rejected() {
    let t = test_app(ScriptedClassifier::replying(PLUMBING_REPLY));
    let filler = "a".repeat(t.app.max_upload_bytes as usize);
    let body = serde_json::json!({ "text": filler }).to_string();

    let resp = handle(post_text(&body), &t.app).unwrap();
    assert_eq!(resp.status(), 400);

    let envelope = body_json(resp);
    assert_eq!(envelope["status"], "error");
    assert!(envelope["message"].as_str().unwrap().contains("exceeds"));
    assert!(t.tickets().is_empty());
    assert_eq!(t.text_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn wrong_method_is_405() {
    let t = test_app(ScriptedClassifier::failing());
    let req = Request::builder()
        .method(Method::GET)
        .uri("/upload_text")
        .body(Body::empty())
        .unwrap();

    let err = handle(req, &t.app).err().expect("expected an error");
    assert_eq!(err.status_code(), 405);
}
