//! Pure Gemini REST API client
//!
//! A minimal client for the Gemini `generateContent` endpoint with no
//! domain-specific logic. Supports multi-modal content, the web search tool,
//! schema-constrained output, and raw payload forwarding for proxies.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{Content, GeminiClient, GenerateContentRequest, Part};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let response = client
//!     .generate_content(
//!         &GenerateContentRequest::new().content(Content::user(vec![Part::text("Hello!")])),
//!     )
//!     .await?;
//!
//! println!("{}", response.text().unwrap_or_default());
//! ```
//!
//! # Type-Safe Structured Output
//!
//! ```rust,ignore
//! use gemini_client::{GenerationConfig, StructuredOutput};
//!
//! let request = GenerateContentRequest::new()
//!     .content(Content::user(vec![Part::text(prompt)]))
//!     .generation_config(GenerationConfig::json_schema(Agenda::response_schema()));
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{GeminiError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Default model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// An upstream response passed through untouched.
#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    /// Upstream HTTP status
    pub status: u16,

    /// Upstream JSON body
    pub body: serde_json::Value,
}

impl ForwardedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variables.
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_MODEL` and `GEMINI_BASE_URL` are optional.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;

        let mut client = Self::new(api_key);
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            client = client.with_model(model);
        }
        if let Ok(url) = std::env::var("GEMINI_BASE_URL") {
            client = client.with_base_url(url);
        }
        Ok(client)
    }

    /// Set the model (default: gemini-2.0-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies, test servers, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Forward an arbitrary JSON payload to `generateContent`.
    ///
    /// Non-2xx statuses are returned, not raised; only transport and body
    /// decoding failures are errors.
    pub async fn forward(&self, payload: &serde_json::Value) -> Result<ForwardedResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(format!("Invalid response body: {}", e)))?;

        debug!(
            model = %self.model,
            status,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        Ok(ForwardedResponse { status, body })
    }

    /// Typed `generateContent` call.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let payload = serde_json::to_value(request)
            .map_err(|e| GeminiError::Parse(format!("Failed to serialize request: {}", e)))?;

        let forwarded = self.forward(&payload).await?;

        if !forwarded.is_success() {
            warn!(status = forwarded.status, body = %forwarded.body, "Gemini API error");
            return Err(GeminiError::from_upstream(forwarded.status, &forwarded.body));
        }

        serde_json::from_value(forwarded.body)
            .map_err(|e| GeminiError::Parse(format!("Unexpected response shape: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("test-key")
            .with_model("gemini-1.5-pro")
            .with_base_url("https://proxy.local/v1beta/");

        assert_eq!(client.api_key(), "test-key");
        assert_eq!(client.model(), "gemini-1.5-pro");
        assert_eq!(
            client.endpoint(),
            "https://proxy.local/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_default_model() {
        let client = GeminiClient::new("k");
        assert_eq!(client.model(), DEFAULT_MODEL);
        assert!(client.endpoint().starts_with("https://generativelanguage.googleapis.com"));
    }

    #[test]
    fn test_forwarded_success_range() {
        let ok = ForwardedResponse {
            status: 200,
            body: serde_json::Value::Null,
        };
        let err = ForwardedResponse {
            status: 429,
            body: serde_json::Value::Null,
        };
        assert!(ok.is_success());
        assert!(!err.is_success());
    }
}
