use crate::classifier::ClassifierError;
use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing input, etc.) or downstream layers (DB, classifier).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Classifier Error: {0}")]
    Classifier(#[from] ClassifierError),
    #[error("Upload Error: {0}")]
    Upload(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::MethodNotAllowed => 405,
            ServerError::BadRequest(_) => 400,
            ServerError::DbError(_)
            | ServerError::Classifier(_)
            | ServerError::Upload(_)
            | ServerError::InternalError => 500,
        }
    }

    /// Message shown to API callers in the `message` field of the envelope.
    pub fn client_message(&self) -> String {
        match self {
            ServerError::BadRequest(msg) => msg.clone(),
            other => format!("Server Error: {other}"),
        }
    }
}
