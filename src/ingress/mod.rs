//! Entry points that turn resident input into tickets.

mod audio;
mod multipart;
mod text;

pub use audio::upload_audio;
pub use text::upload_text;

use crate::app::App;
use crate::db::tickets::create_ticket;
use crate::domain::ClassificationResult;
use crate::errors::{ResultResp, ServerError};
use crate::responses::json_response;
use astra::Request;
use serde::Serialize;
use std::io::Read;

#[derive(Debug, Serialize)]
struct Envelope {
    message: &'static str,
    /// The classification, serialized as a JSON string.
    ai_response: String,
    status: &'static str,
}

/// Classify `text`, store it if it is a complaint, and build the success
/// envelope.
fn process(app: &App, text: &str) -> ResultResp {
    let result = app.privacy.classify(app.classifier.as_ref(), text);
    persist_if_complaint(app, &result)?;

    let ai_response = serde_json::to_string(&result).map_err(|_| ServerError::InternalError)?;
    json_response(
        200,
        &Envelope {
            message: "Processed",
            ai_response,
            status: "success",
        },
    )
}

fn persist_if_complaint(app: &App, result: &ClassificationResult) -> Result<(), ServerError> {
    if result.is_private() {
        tracing::info!(
            action = result.action.as_deref().unwrap_or(""),
            target = result.target.as_deref().unwrap_or(""),
            "private request detected, not stored"
        );
        return Ok(());
    }

    let id = app
        .db
        .with_conn(|conn| create_ticket(conn, &result.category, &result.text))?;
    tracing::info!(ticket_id = id, category = %result.category, "ticket saved");
    Ok(())
}

/// Read the whole request body, refusing anything over `limit` bytes.
fn read_limited(req: &mut Request, limit: u64) -> Result<Vec<u8>, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .take(limit.saturating_add(1))
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("Could not read body: {e}")))?;

    if body.len() as u64 > limit {
        return Err(ServerError::BadRequest(format!(
            "Request body exceeds {limit} bytes"
        )));
    }
    Ok(body)
}
