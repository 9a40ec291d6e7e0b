//! Gemini prompt relay
//!
//! A small HTTP server that forwards a user-supplied prompt to the Google
//! Gemini generateContent API and returns the generated text as JSON. It
//! also serves the browser chat page that talks to the endpoint.

mod api;
mod core;
mod models;

use crate::api::endpoints::{AppState, create_router};
use crate::core::backends::GeminiBackend;
use crate::core::config::Config;
use crate::core::generator::TextGenerator;
use crate::core::logging::init_logging;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Check for --help flag
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    // Load .env before resolving configuration
    dotenv::dotenv().ok();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config.log_level);

    // Print startup banner
    print_startup_banner(&config);

    // A missing key is reported per request, not fatal at startup
    if !config.api_key_configured() {
        warn!("GEMINI_API_KEY is not set; chat requests will fail until it is configured");
    }

    // Create the generator backend
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiBackend::new(
        config.gemini_api_key.clone(),
        config.base_url.clone(),
        config.model.clone(),
        config.request_timeout,
    ));

    info!("Using backend: {}", generator.backend_name());

    // Create application state
    let app_state = AppState {
        config: config.clone(),
        generator,
    };

    // Create router
    let app = create_router(app_state);

    // Bind to address
    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!("🚀 Gemini Prompt Relay v0.1.0");
    println!("✅ Configuration loaded successfully");
    println!("   Model: {}", config.model);
    println!("   Base URL: {}", config.base_url);
    println!("   Request Timeout: {}s", config.request_timeout);
    println!("   Server: {}:{}", config.host, config.port);
    println!(
        "   Gemini API Key: {}",
        if config.api_key_configured() {
            "Configured"
        } else {
            "Not configured"
        }
    );
    println!();
}

/// Print help message
fn print_help() {
    println!("Gemini Prompt Relay v0.1.0");
    println!();
    println!("Usage: gemini-relay [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Environment variables:");
    println!("  GEMINI_API_KEY - Gemini API key (overrides the config file)");
    println!("  CONFIG_PATH - Path to the TOML config file (default: config.toml)");
    println!();
    println!("Config file sections:");
    println!("  [gemini]  api_key, model (default: gemini-pro), base_url");
    println!("  [server]  host (default: 0.0.0.0), port (default: 3000), log_level");
    println!("  [request] request_timeout in seconds (default: 90)");
    println!();
    println!("Endpoints:");
    println!("  GET  /          Chat page");
    println!("  POST /api/chat  Relay a prompt: {{\"prompt\": \"...\"}}");
    println!("  GET  /health    Health check");
}
