//! Testing utilities including a mock model.
//!
//! Useful for testing applications that use the documenter library without
//! making real model calls.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use gemini_client::{Citation, GenerateContentRequest, GenerateContentResponse};

use crate::error::{DocumenterError, Result};
use crate::traits::Model;

/// A scripted model.
///
/// Replies are returned in the order they were added. Every request is
/// recorded for assertions. With no reply left, calls fail with an upstream
/// error.
#[derive(Default, Clone)]
pub struct MockModel {
    replies: Arc<RwLock<VecDeque<Result<GenerateContentResponse>>>>,
    requests: Arc<RwLock<Vec<GenerateContentRequest>>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain text reply.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_response(GenerateContentResponse::from_text(text))
    }

    /// Queue a text reply with grounding citations.
    pub fn with_grounded_text(
        self,
        text: impl Into<String>,
        citations: impl IntoIterator<Item = Citation>,
    ) -> Self {
        self.with_response(GenerateContentResponse::from_text(text).with_citations(citations))
    }

    /// Queue a full response.
    pub fn with_response(self, response: GenerateContentResponse) -> Self {
        self.replies.write().unwrap().push_back(Ok(response));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: DocumenterError) -> Self {
        self.replies.write().unwrap().push_back(Err(error));
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

#[async_trait]
impl Model for MockModel {
    async fn generate(&self, request: GenerateContentRequest) -> Result<GenerateContentResponse> {
        self.requests.write().unwrap().push(request);

        self.replies
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(DocumenterError::Upstream {
                    status: 500,
                    message: "MockModel has no scripted reply".into(),
                    details: None,
                })
            })
    }
}
