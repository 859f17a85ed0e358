//! Typed errors for the documenter library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell a
//! configuration problem from an upstream failure from unusable model output.

use gemini_client::GeminiError;
use thiserror::Error;

/// Errors that can occur during document operations.
#[derive(Debug, Error)]
pub enum DocumenterError {
    /// Required credential or setting is absent
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Model endpoint returned a non-success status
    #[error("upstream error ({status}): {message}")]
    Upstream {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Transport failure before any status was received
    #[error("network error: {0}")]
    Network(String),

    /// Model output could not be reduced to the required shape
    #[error("malformed model output: {reason}")]
    MalformedOutput { reason: String },

    /// Caller input rejected before any request was made
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl DocumenterError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedOutput {
            reason: reason.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<GeminiError> for DocumenterError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Config(msg) => Self::Configuration(msg),
            GeminiError::Network(msg) => Self::Network(msg),
            GeminiError::Api {
                status,
                message,
                details,
            } => Self::Upstream {
                status,
                message,
                details,
            },
            GeminiError::Parse(msg) => Self::MalformedOutput { reason: msg },
        }
    }
}

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, DocumenterError>;
