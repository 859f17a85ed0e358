use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    model_configured: bool,
}

/// Health check endpoint
///
/// Always 200; `modelConfigured` reports whether an API key was supplied.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_configured: state.documenter.is_some(),
    })
}
