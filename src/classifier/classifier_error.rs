use thiserror::Error;

/// Why a call to the classification model did not yield a usable answer.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },
    #[error("audio upload failed: {0}")]
    Upload(String),
    #[error("model returned no text")]
    EmptyResponse,
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<reqwest::Error> for ClassifierError {
    fn from(e: reqwest::Error) -> Self {
        ClassifierError::Network(e.to_string())
    }
}
