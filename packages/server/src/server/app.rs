//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{any, get, post},
    Router,
};
use documenter::{Documenter, GeminiClient, Model};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::server::error::ApiError;
use crate::server::routes::{
    analyze_handler, briefing_handler, chat_handler, gemini_proxy_handler, health_handler,
    projects_handler, search_handler, transform_handler,
};

/// Shared application state
///
/// Both halves are `None` when no API key is configured; routes then answer
/// with a configuration error instead of the server refusing to start.
#[derive(Clone, Default)]
pub struct AppState {
    /// Raw pass-through client for the browser proxy
    pub gemini: Option<Arc<GeminiClient>>,
    pub documenter: Option<Documenter>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let Some(api_key) = config.gemini_api_key.clone() else {
            warn!("GEMINI_API_KEY not set; model routes will return 500");
            return Self::default();
        };

        let mut client = GeminiClient::new(api_key);
        if let Some(model) = &config.gemini_model {
            client = client.with_model(model);
        }
        if let Some(url) = &config.gemini_base_url {
            client = client.with_base_url(url);
        }

        let client = Arc::new(client);
        let model: Arc<dyn Model> = client.clone();
        Self {
            gemini: Some(client),
            documenter: Some(Documenter::new(model)),
        }
    }

    /// Operations backed by any model, e.g. a mock in tests.
    pub fn with_model(model: Arc<dyn Model>) -> Self {
        Self {
            gemini: None,
            documenter: Some(Documenter::new(model)),
        }
    }

    pub fn with_gemini(mut self, client: GeminiClient) -> Self {
        self.gemini = Some(Arc::new(client));
        self
    }

    pub fn documenter(&self) -> Result<&Documenter, ApiError> {
        self.documenter.as_ref().ok_or(ApiError::MissingApiKey)
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid allowed origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        // Raw proxy: method handling is done by the handler
        .route("/api/gemini", any(gemini_proxy_handler))
        // Document operations
        .route("/api/analyze", post(analyze_handler))
        .route("/api/briefing", post(briefing_handler))
        .route("/api/search", post(search_handler))
        .route("/api/transform", post(transform_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/projects", get(projects_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
