// src/ingress/text.rs
use crate::app::App;
use crate::errors::{ResultResp, ServerError};
use astra::Request;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TextUpload {
    text: Option<String>,
}

/// `POST /upload_text` with `{"text": "..."}`.
pub fn upload_text(mut req: Request, app: &App) -> ResultResp {
    let body = super::read_limited(&mut req, app.max_upload_bytes)?;

    let text = serde_json::from_slice::<TextUpload>(&body)
        .ok()
        .and_then(|u| u.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("No text provided".into()))?;

    super::process(app, &text)
}
