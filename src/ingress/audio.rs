// src/ingress/audio.rs
use super::multipart::find_file_field;
use crate::app::App;
use crate::classifier::{transcribe, AudioClip};
use crate::errors::{ResultResp, ServerError};
use astra::Request;
use mime::Mime;
use std::io::Write;

const DEFAULT_AUDIO_MIME: &str = "audio/mp4";

/// `POST /upload_audio` with a multipart `audio` field.
pub fn upload_audio(mut req: Request, app: &App) -> ResultResp {
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let body = super::read_limited(&mut req, app.max_upload_bytes)?;

    let part = find_file_field(&content_type, body, "audio")?
        .filter(|p| !p.data.is_empty())
        .ok_or_else(|| ServerError::BadRequest("No audio file".into()))?;

    let mime_type = audio_mime(part.content_type.as_ref());

    // Unique per request; removed when `scratch` drops.
    let mut scratch = tempfile::Builder::new()
        .prefix("audio-")
        .suffix(extension_for(&mime_type))
        .tempfile_in(&app.scratch_dir)
        .map_err(|e| ServerError::Upload(format!("create scratch file: {e}")))?;
    scratch
        .write_all(&part.data)
        .and_then(|_| scratch.flush())
        .map_err(|e| ServerError::Upload(format!("write scratch file: {e}")))?;

    let clip = AudioClip {
        path: scratch.path(),
        mime_type: &mime_type,
    };
    let transcript = transcribe(app.classifier.as_ref(), clip).map_err(|e| {
        tracing::error!(error = %e, "transcription failed");
        ServerError::from(e)
    })?;
    tracing::debug!(transcript = %transcript, "audio transcribed");

    super::process(app, &transcript)
}

/// Browsers and phone clients often send `application/octet-stream`; treat
/// anything that is not audio as the m4a recordings the app produces.
fn audio_mime(declared: Option<&Mime>) -> String {
    match declared {
        Some(m) if m.type_() == mime::AUDIO => m.essence_str().to_string(),
        _ => DEFAULT_AUDIO_MIME.to_string(),
    }
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "audio/mp4" | "audio/x-m4a" | "audio/m4a" | "audio/aac" => ".m4a",
        "audio/mpeg" | "audio/mp3" => ".mp3",
        "audio/wav" | "audio/x-wav" => ".wav",
        "audio/ogg" => ".ogg",
        "audio/flac" => ".flac",
        _ => ".audio",
    }
}
