//! Error types for Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, quota, invalid request)
    #[error("API error ({status}): {message}")]
    Api {
        /// Upstream HTTP status code
        status: u16,
        /// `error.message` from the upstream body, or a generic fallback
        message: String,
        /// The upstream `error` object, when the body carried one
        details: Option<serde_json::Value>,
    },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeminiError {
    /// Build an API error from an upstream status and (possibly non-JSON) body.
    pub fn from_upstream(status: u16, body: &serde_json::Value) -> Self {
        let details = body.get("error").cloned();
        let message = details
            .as_ref()
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .unwrap_or("Gemini API request failed")
            .to_string();

        GeminiError::Api {
            status,
            message,
            details,
        }
    }
}
