//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use documenter::DocumenterError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub const MISSING_KEY_MESSAGE: &str = "Server configuration error: API key not configured";

/// JSON error body shared by every route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Same text in `error` and `message`.
    pub fn plain(message: &str) -> Self {
        Self::new(message, message)
    }
}

/// Failure of an operation route.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Server configuration error: API key not configured")]
    MissingApiKey,

    #[error(transparent)]
    Documenter(#[from] DocumenterError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Documenter(err) => match err {
                DocumenterError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
                DocumenterError::Upstream { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                DocumenterError::Network(_) | DocumenterError::MalformedOutput { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                DocumenterError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            },
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ApiError::MissingApiKey => MISSING_KEY_MESSAGE,
            ApiError::Documenter(err) => match err {
                DocumenterError::Configuration(_) => "Server configuration error",
                DocumenterError::Upstream { .. } => "Gemini API request failed",
                DocumenterError::Network(_) => "Gemini API unreachable",
                DocumenterError::MalformedOutput { .. } => "Unusable model output",
                DocumenterError::InvalidInput { .. } => "Invalid request",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %self, "Operation failed");
        }

        let mut body = ErrorBody::new(self.label(), self.to_string());
        if let ApiError::Documenter(DocumenterError::Upstream { details, .. }) = self {
            body.details = details;
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingApiKey.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::from(DocumenterError::Upstream {
                status: 429,
                message: "slow down".into(),
                details: None,
            })
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::from(DocumenterError::malformed("no json")).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(DocumenterError::Network("reset".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(DocumenterError::invalid_input("bad task")).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_missing_key_message() {
        assert_eq!(ApiError::MissingApiKey.to_string(), MISSING_KEY_MESSAGE);
    }
}
