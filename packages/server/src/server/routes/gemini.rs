//! Raw `generateContent` proxy for browser clients.

use axum::{
    extract::Extension,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use gemini_client::GeminiError;
use serde_json::Value;
use tracing::{debug, warn};

use crate::server::app::AppState;
use crate::server::error::{ErrorBody, MISSING_KEY_MESSAGE};

const UPSTREAM_FAILED: &str = "Gemini API request failed";

/// Forward the request body to Gemini with the server-held key.
///
/// - `OPTIONS` answers 200 with an empty body
/// - other non-POST methods answer 405
/// - upstream success passes the body through verbatim
/// - upstream failure keeps the upstream status; `error` and `message` both
///   carry the upstream message and `details` the upstream `error` object
pub async fn gemini_proxy_handler(
    Extension(state): Extension<AppState>,
    method: Method,
    body: String,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    if method != Method::POST {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(ErrorBody::plain("Method Not Allowed")),
        )
            .into_response();
    }

    let Some(client) = state.gemini.as_ref() else {
        warn!("Proxy called without a configured API key");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::plain(MISSING_KEY_MESSAGE)),
        )
            .into_response();
    };

    let payload = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(message) => return internal_error(message),
    };

    match client.forward(&payload).await {
        Ok(forwarded) if forwarded.is_success() => {
            debug!(status = forwarded.status, "Proxied generateContent");
            Json(forwarded.body).into_response()
        }
        Ok(forwarded) => {
            warn!(status = forwarded.status, "Gemini API error");
            let status =
                StatusCode::from_u16(forwarded.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let message = forwarded
                .body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or(UPSTREAM_FAILED)
                .to_string();
            let body = ErrorBody {
                error: message.clone(),
                message,
                details: forwarded.body.get("error").cloned(),
            };
            (status, Json(body)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Proxy request failed");
            internal_error(match e {
                GeminiError::Network(msg) | GeminiError::Parse(msg) | GeminiError::Config(msg) => {
                    msg
                }
                other => other.to_string(),
            })
        }
    }
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::plain(&message)),
    )
        .into_response()
}

/// Parse the proxied body; an empty body forwards as `{}`.
fn parse_payload(body: &str) -> Result<Value, String> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(body).map_err(|e| format!("Invalid JSON body: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload("  ").unwrap(), serde_json::json!({}));
        assert!(parse_payload(r#"{"contents": []}"#).unwrap()["contents"].is_array());
        assert!(parse_payload("{not json").is_err());
    }
}
