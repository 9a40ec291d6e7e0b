//! Request and response bodies for the relay's own HTTP endpoint

use serde::{Deserialize, Serialize};

/// Body of POST /api/chat
///
/// The prompt is optional at the serde level so that a missing field is
/// reported as a 400 by the handler instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Successful response: the generated text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Error response body
///
/// `message` is always present; `error` carries the underlying backend
/// error text when a generation call failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
        }
    }
}
