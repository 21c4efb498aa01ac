//! Application configuration loaded from environment variables.

use serde::Deserialize;

use crate::error::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Gemini Credentials ===
    /// Google API key authorizing calls to the Gemini API. Optional: when
    /// absent the server still starts, but both endpoints report the model
    /// as unavailable. Never logged.
    #[serde(default)]
    pub google_api_key: Option<String>,

    // === Model Configuration ===
    /// Model identifier the client is bound to.
    #[serde(default = "default_model")]
    pub gemini_model: String,

    /// Base URL of the generative language API.
    #[serde(default = "default_base_url")]
    pub gemini_base_url: String,

    /// Timeout for outbound model calls, in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    // === Metrics ===
    /// Enable the Prometheus metrics exporter.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Port for the Prometheus scrape endpoint.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_http_timeout() -> u64 {
    120
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_metrics_port() -> u16 {
    9090
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    ///
    /// A missing API key is deliberately not a validation error: the server
    /// must still start so the health endpoint can report the failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.gemini_model.trim().is_empty() {
            return Err("GEMINI_MODEL must not be empty".to_string());
        }

        if self.gemini_base_url.trim().is_empty() {
            return Err("GEMINI_BASE_URL must not be empty".to_string());
        }

        if self.http_timeout_secs == 0 {
            return Err("HTTP_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Whether a usable (present and non-blank) API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.google_api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }
}
