//! Application configuration management
//!
//! Configuration comes from an optional TOML file plus the environment.
//! The API key is resolved with the GEMINI_API_KEY environment variable
//! taking precedence over the file, and its absence is not fatal at
//! startup: the chat endpoint reports it per request.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name
const DEFAULT_MODEL: &str = "gemini-pro";

/// Default server port
const DEFAULT_PORT: u16 = 3000;

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT: u64 = 90;

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSection {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestSection {
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for RequestSection {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub gemini: GeminiSection,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub request: RequestSection,
}

/// Application configuration
///
/// Flattened and resolved at startup; handlers receive it through the
/// application state instead of reading ambient process globals.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key, empty when not configured
    pub gemini_api_key: String,

    /// Model name used for generateContent calls
    pub model: String,

    /// Generative Language API base URL
    pub base_url: String,

    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logging level
    pub log_level: String,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the TOML file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let config: TomlConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration")?;

        Ok(Self::from_toml(config))
    }

    /// Load configuration from the environment and an optional config file
    ///
    /// Looks for the file named by CONFIG_PATH (default config.toml). A
    /// missing file is not an error: defaults apply and the API key comes
    /// from the environment alone.
    pub fn from_env() -> Result<Self> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(config_path)
        } else {
            Ok(Self::from_toml(TomlConfig::default()))
        }
    }

    fn from_toml(config: TomlConfig) -> Self {
        let env_key = std::env::var("GEMINI_API_KEY").ok();
        let gemini_api_key = resolve_api_key(env_key, config.gemini.api_key);

        Config {
            gemini_api_key,
            model: config.gemini.model,
            base_url: config.gemini.base_url,
            host: config.server.host,
            port: config.server.port,
            log_level: config.server.log_level,
            request_timeout: config.request.request_timeout,
        }
    }

    /// Whether a Gemini API key is present
    pub fn api_key_configured(&self) -> bool {
        !self.gemini_api_key.is_empty()
    }
}

/// Resolve the API key: environment wins over the config file
fn resolve_api_key(env_key: Option<String>, file_key: Option<String>) -> String {
    env_key
        .filter(|key| !key.is_empty())
        .or(file_key)
        .unwrap_or_default()
}
