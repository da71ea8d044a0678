// File: src/error.rs
// Purpose: Errors raised while talking to the REST API

use estate_forms::SubmitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with an error status or an error envelope.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("not signed in")]
    MissingToken,

    #[error("credential store: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<ApiError> for SubmitError {
    fn from(err: ApiError) -> Self {
        match err {
            // Building the request failed locally (e.g. a bad MIME type); nothing was sent
            ApiError::Http(err) if err.is_builder() => {
                tracing::warn!(error = %err, "request could not be built");
                SubmitError::rejected(None, "")
            }
            ApiError::Http(err) => SubmitError::NetworkFailure(err.to_string()),
            ApiError::Rejected { status, message } => SubmitError::rejected(Some(status), message),
            ApiError::MissingToken => SubmitError::rejected(Some(401), "Please log in to continue"),
            // The server answered, but with nothing usable; the form shows its own banner
            ApiError::Decode(_) | ApiError::Storage(_) => SubmitError::rejected(None, ""),
        }
    }
}
