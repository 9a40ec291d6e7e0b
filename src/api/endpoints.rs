//! API endpoint handlers
//!
//! This module implements the HTTP endpoints of the relay: the chat
//! endpoint, the static chat page, and a health check.

use crate::core::config::Config;
use crate::core::generator::TextGenerator;
use crate::models::api::{ChatRequest, ChatResponse, ErrorBody};
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Chat page served at the root
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Browser script the chat page loads
const BROWSER_SCRIPT: &str = include_str!("../../static/script.js");

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<dyn TextGenerator>,
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/script.js", get(browser_script))
        .route("/api/chat", post(create_chat).fallback(method_not_allowed))
        .route("/health", get(health_check))
        .with_state(state)
}

fn error_response(status: StatusCode, body: ErrorBody) -> Response {
    (status, Json(body)).into_response()
}

/// POST /api/chat - Relay a prompt to the generator
async fn create_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let prompt = request.prompt.as_deref().map(str::trim).unwrap_or("");

    if prompt.is_empty() {
        warn!("Rejected chat request with missing prompt");
        return error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody::new("Missing prompt text."),
        );
    }

    if !state.config.api_key_configured() {
        error!("Gemini API key is not configured");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new("Gemini API key is not configured."),
        );
    }

    info!("📥 Incoming chat request: {} chars", prompt.len());
    debug!("Full prompt: {:?}", prompt);

    match state.generator.generate(prompt).await {
        Ok(text) => Json(ChatResponse { response: text }).into_response(),
        Err(e) => {
            error!("Text generation failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::with_error("Error while generating content.", e.to_string()),
            )
        }
    }
}

/// Fallback for /api/chat on any method other than POST
async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorBody::new("This endpoint only accepts POST requests."),
    )
}

/// GET / - Serve the chat page
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /script.js - Serve the browser script
async fn browser_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        BROWSER_SCRIPT,
    )
}

/// GET /health - Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "backend": state.generator.backend_name(),
        "model": state.config.model,
        "gemini_api_key_configured": state.config.api_key_configured(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::GeneratorError;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::util::ServiceExt;

    /// Deterministic generator that records how often it was invoked
    struct StubGenerator {
        reply: Result<String, String>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GeneratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(GeneratorError::Unexpected)
        }

        fn backend_name(&self) -> &str {
            "stub"
        }
    }

    fn test_router(
        api_key: &str,
        reply: Result<String, String>,
    ) -> (Router, Arc<AtomicUsize>) {
        let config = Config {
            gemini_api_key: api_key.to_string(),
            model: "gemini-pro".to_string(),
            base_url: "http://localhost".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            log_level: "info".to_string(),
            request_timeout: 5,
        };
        let calls = Arc::new(AtomicUsize::new(0));
        let state = AppState {
            config: Arc::new(config),
            generator: Arc::new(StubGenerator {
                reply,
                calls: calls.clone(),
            }),
        };
        (create_router(state), calls)
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_non_post_method_is_rejected() {
        let (router, calls) = test_router("key", Ok("hi".to_string()));

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/chat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = json_body(response).await;
        assert!(body["message"].as_str().unwrap().contains("POST"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_prompt_is_rejected() {
        let (router, calls) = test_router("key", Ok("hi".to_string()));

        let response = router.oneshot(chat_request("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Missing prompt text.");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_whitespace_prompt_is_rejected() {
        let (router, calls) = test_router("key", Ok("hi".to_string()));

        let response = router
            .oneshot(chat_request(r#"{"prompt":"   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_a_server_error() {
        let (router, calls) = test_router("", Ok("hi".to_string()));

        let response = router
            .oneshot(chat_request(r#"{"prompt":"hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Gemini API key is not configured.");
        assert!(body.get("error").is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_generation() {
        let (router, calls) = test_router("key", Ok("generated text".to_string()));

        let response = router
            .oneshot(chat_request(r#"{"prompt":"hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body, json!({ "response": "generated text" }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generator_failure_is_passed_through() {
        let (router, calls) = test_router("key", Err("backend exploded".to_string()));

        let response = router
            .oneshot(chat_request(r#"{"prompt":"hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Error while generating content.");
        assert_eq!(body["error"], "Unexpected error: backend exploded");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_chat_page_is_served() {
        let (router, _) = test_router("key", Ok("hi".to_string()));

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("promptInput"));
        assert!(page.contains("sendButton"));
        assert!(page.contains("responseOutput"));
    }

    #[tokio::test]
    async fn test_browser_script_is_served() {
        let (router, _) = test_router("key", Ok("hi".to_string()));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/script.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/javascript"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let script = String::from_utf8(bytes.to_vec()).unwrap();
        // The empty-input branch returns before the button is ever disabled.
        let empty_branch = script.find("Please enter a question!").unwrap();
        let disable = script.find("sendButton.disabled = true").unwrap();
        assert!(empty_branch < disable);
        assert!(script.contains("fetch('/api/chat'"));
        assert!(script.contains("sendButton.disabled = false"));
    }

    #[tokio::test]
    async fn test_health_reports_key_state() {
        let (router, _) = test_router("", Ok("hi".to_string()));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["gemini_api_key_configured"], false);
        assert_eq!(body["backend"], "stub");
    }
}
