//! Gemini implementation of the Model trait.
//!
//! ```rust,ignore
//! use documenter::Documenter;
//! use gemini_client::GeminiClient;
//!
//! let documenter = Documenter::new(Arc::new(GeminiClient::from_env()?));
//! ```

use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateContentRequest, GenerateContentResponse};

use crate::error::Result;
use crate::traits::Model;

#[async_trait]
impl Model for GeminiClient {
    async fn generate(&self, request: GenerateContentRequest) -> Result<GenerateContentResponse> {
        Ok(self.generate_content(&request).await?)
    }
}
