// src/classifier/gemini.rs
use super::{AudioClip, Classifier, ClassifierError};
use crate::config::AppConfig;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Gemini API structs (private)
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    File { file_data: FileData<'a> },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileData<'a> {
    mime_type: &'a str,
    file_uri: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct UploadStart<'a> {
    file: UploadMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct UploadMetadata<'a> {
    display_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: UploadedFile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFile {
    uri: String,
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: u16,
    message: String,
}

// ============================================================================
// GeminiClient
// ============================================================================

/// Blocking client for the Gemini `generateContent` and Files APIs.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ClassifierError> {
        Self::with_base_url(
            config.api_key.clone(),
            config.model.clone(),
            config.gemini_base_url.clone(),
            config.request_timeout,
        )
    }

    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn generate_parts(&self, parts: Vec<Part<'_>>) -> Result<String, ClassifierError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateRequest {
            contents: vec![Content { parts }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()?;
        let response = check_status(response)?;

        let body: GenerateResponse = response
            .json()
            .map_err(|e| ClassifierError::JsonParse(format!("generateContent reply: {e}")))?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyResponse);
        }
        Ok(text)
    }

    /// Register a local file with the Files API (resumable protocol, single
    /// chunk) and return its URI and the mime type the provider recorded.
    fn upload_file(&self, audio: AudioClip<'_>) -> Result<(String, String), ClassifierError> {
        let bytes = std::fs::read(audio.path)
            .map_err(|e| ClassifierError::Upload(format!("read {}: {e}", audio.path.display())))?;
        let display_name = audio
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio");

        let start = self
            .client
            .post(format!("{}/upload/v1beta/files", self.base_url))
            .query(&[("key", &self.api_key)])
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", bytes.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", audio.mime_type)
            .json(&UploadStart {
                file: UploadMetadata { display_name },
            })
            .send()?;
        let start = check_status(start)?;

        let upload_url = start
            .headers()
            .get("x-goog-upload-url")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ClassifierError::Upload("no upload URL in reply".into()))?;

        let finish = self
            .client
            .post(upload_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(bytes)
            .send()?;
        let finish = check_status(finish)?;

        let uploaded: UploadResponse = finish
            .json()
            .map_err(|e| ClassifierError::Upload(format!("unexpected upload reply: {e}")))?;

        tracing::debug!(uri = %uploaded.file.uri, "audio registered with provider");

        let mime = uploaded
            .file
            .mime_type
            .unwrap_or_else(|| audio.mime_type.to_string());
        Ok((uploaded.file.uri, mime))
    }
}

impl Classifier for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, ClassifierError> {
        self.generate_parts(vec![Part::Text { text: prompt }])
    }

    fn generate_with_audio(
        &self,
        audio: AudioClip<'_>,
        prompt: &str,
    ) -> Result<String, ClassifierError> {
        let (uri, mime) = self.upload_file(audio)?;
        self.generate_parts(vec![
            Part::File {
                file_data: FileData {
                    mime_type: &mime,
                    file_uri: &uri,
                },
            },
            Part::Text { text: prompt },
        ])
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Turn a non-2xx reply into `ClassifierError::Api`, preferring the
/// provider's own error message.
fn check_status(response: Response) -> Result<Response, ClassifierError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().unwrap_or_default();
    let (code, message) = serde_json::from_str::<ErrorResponse>(&error_body)
        .ok()
        .and_then(|e| e.error)
        .map(|e| (e.code, e.message))
        .unwrap_or((status.as_u16(), error_body));

    tracing::error!(code, message = %message, "Gemini API error");
    Err(ClassifierError::Api { code, message })
}
