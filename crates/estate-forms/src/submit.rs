// File: src/submit.rs
// Purpose: Submission errors and the collaborator that sends payloads

use serde_json::Value;
use thiserror::Error;

use crate::payload::FormPayload;

/// Why a submission did not go through. Shown as a single banner, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Network error: {0}")]
    NetworkFailure(String),

    #[error("{message}")]
    ServerRejected { status: Option<u16>, message: String },
}

impl SubmitError {
    pub fn rejected(status: Option<u16>, message: impl Into<String>) -> Self {
        SubmitError::ServerRejected {
            status,
            message: message.into(),
        }
    }

    /// Banner text: the server's own message when it sent one, otherwise `fallback`.
    pub fn banner(&self, fallback: &str) -> String {
        match self {
            SubmitError::ServerRejected { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Sends a validated payload to the REST API.
#[allow(async_fn_in_trait)]
pub trait Submitter {
    /// Returns the `data` member of a successful response.
    async fn submit(&self, payload: &FormPayload) -> Result<Value, SubmitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_prefers_server_message() {
        let err = SubmitError::rejected(Some(401), "Invalid email or password");
        assert_eq!(err.banner("Login failed"), "Invalid email or password");
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_banner_falls_back() {
        let network = SubmitError::NetworkFailure("connection refused".into());
        assert_eq!(network.banner("Login failed"), "Login failed");

        let empty = SubmitError::rejected(Some(500), "");
        assert_eq!(
            empty.banner("An error occurred while saving the property"),
            "An error occurred while saving the property"
        );
    }
}
