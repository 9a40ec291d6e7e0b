//! Text generator abstraction
//!
//! This module defines the trait the chat endpoint talks to, so the HTTP
//! layer never depends on a concrete AI backend and tests can substitute a
//! deterministic stub.

use async_trait::async_trait;
use thiserror::Error;

/// Error types for generation calls
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Trait for text generation backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text from a single user prompt
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;

    /// Get the backend name for logging
    fn backend_name(&self) -> &str;
}
