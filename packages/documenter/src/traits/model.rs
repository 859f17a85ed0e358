//! Model trait for generative calls.

use async_trait::async_trait;
use gemini_client::{GenerateContentRequest, GenerateContentResponse};

use crate::error::Result;

/// A generative model endpoint.
///
/// Implementations wrap a provider client (see [`crate::ai`]) or script
/// replies for tests (see [`crate::testing::MockModel`]). A call either
/// returns the provider's response or fails; implementations must not retry.
#[async_trait]
pub trait Model: Send + Sync {
    /// Run one `generateContent` call.
    async fn generate(&self, request: GenerateContentRequest) -> Result<GenerateContentResponse>;
}
