//! Gemini backend implementation
//!
//! Talks to the Google Generative Language API's generateContent endpoint
//! over its v1beta REST surface, the same call the official SDKs make.

use crate::core::generator::{GeneratorError, TextGenerator};
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Gemini text generation backend
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiBackend {
    /// Create a new Gemini backend
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key
    /// * `base_url` - Generative Language API base URL
    /// * `model` - Model name, e.g. "gemini-pro"
    /// * `timeout` - Request timeout in seconds
    pub fn new(api_key: String, base_url: String, model: String, timeout: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    /// Classify Gemini errors and provide helpful messages
    fn classify_error(error_detail: &str) -> String {
        let error_lower = error_detail.to_lowercase();

        if error_lower.contains("api_key_invalid") || error_lower.contains("api key not valid") {
            return "Invalid API key. Please check your GEMINI_API_KEY configuration.".to_string();
        }

        if error_lower.contains("permission_denied") || error_lower.contains("unauthenticated") {
            return "Access denied. Please check that your API key is authorized for the Generative Language API.".to_string();
        }

        if error_lower.contains("resource_exhausted") || error_lower.contains("quota") {
            return "Rate limit or quota exceeded. Please wait and try again, or upgrade your API plan.".to_string();
        }

        if error_lower.contains("not_found")
            || (error_lower.contains("model") && error_lower.contains("not found"))
        {
            return "Model not found. Please check your model configuration.".to_string();
        }

        error_detail.to_string()
    }

    /// Internal method to send a generateContent request
    async fn send_generate_request(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeneratorError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| GeneratorError::Unexpected(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let classified_error = Self::classify_error(&error_text);

            return Err(match status.as_u16() {
                401 | 403 => GeneratorError::Authentication(classified_error),
                429 => GeneratorError::RateLimit(classified_error),
                400 => GeneratorError::BadRequest(classified_error),
                _ => GeneratorError::ApiError {
                    status: status.as_u16(),
                    message: classified_error,
                },
            });
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Unexpected(format!("Failed to parse response: {}", e)))?;

        Ok(completion)
    }
}

#[async_trait]
impl TextGenerator for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let response = self.send_generate_request(&request).await?;

        response.text().ok_or_else(|| {
            GeneratorError::Unexpected("Response contained no candidate text".to_string())
        })
    }

    fn backend_name(&self) -> &str {
        "Gemini"
    }
}
