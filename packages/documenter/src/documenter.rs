//! The operation facade: analyze, brief, search, transform, chat.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::DocumenterConfig;
use crate::error::{DocumenterError, Result};
use crate::pipeline::{
    build_analysis_request, build_briefing_request, build_search_request, parse_analysis,
    parse_briefing_payload, GroundingMerger,
};
use crate::session::{create_chat_session, ChatSession};
use crate::traits::Model;
use crate::transform::{transform_text, TransformTask};
use crate::types::source::PROVENANCE_BRIEFING;
use crate::types::{AnalysisResult, CivicBriefing, DocumentInput, SearchResultItem};

/// Stateless entry point for every document operation.
///
/// Cheap to clone and safe to share across tasks; each call is independent.
#[derive(Clone)]
pub struct Documenter {
    model: Arc<dyn Model>,
    config: DocumenterConfig,
}

impl Documenter {
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self {
            model,
            config: DocumenterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DocumenterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DocumenterConfig {
        &self.config
    }

    /// Analyze raw content (base64 binary, text, or a URL marker).
    pub async fn analyze(&self, content: impl Into<String>, mime_type: &str) -> Result<AnalysisResult> {
        self.analyze_input(&DocumentInput::classify(content, mime_type))
            .await
    }

    /// Analyze an already classified document.
    ///
    /// A result whose summary is `COULD_NOT_READ` is a successful, degraded
    /// outcome; check [`AnalysisResult::is_unreadable`].
    pub async fn analyze_input(&self, input: &DocumentInput) -> Result<AnalysisResult> {
        let start = std::time::Instant::now();
        let request = build_analysis_request(input, &self.config).into_request();

        let response = self.model.generate(request).await?;
        let text = response
            .text()
            .ok_or_else(|| DocumenterError::malformed("analysis response had no text"))?;

        let result = parse_analysis(&text)?;

        if result.is_unreadable() {
            info!(input = input.kind(), "Model could not read the source document");
        }
        debug!(
            input = input.kind(),
            highlights = result.highlights.len(),
            keywords = result.word_cloud.len(),
            snippets = result.snippets.len(),
            duration_ms = start.elapsed().as_millis(),
            "Analysis complete"
        );

        Ok(result)
    }

    /// Search-grounded briefing on `topic` in `location`.
    pub async fn brief(&self, topic: &str, location: &str) -> Result<CivicBriefing> {
        let request = build_briefing_request(topic, location, &self.config).into_request();

        let response = self.model.generate(request).await?;
        let text = response
            .text()
            .ok_or_else(|| DocumenterError::malformed("briefing response had no text"))?;
        let payload = parse_briefing_payload(&text)?;

        let mut merger = GroundingMerger::new();
        merger.add_citations(&response.citations());
        for (title, link) in &payload.sources {
            merger.push_link(title.as_deref(), link, PROVENANCE_BRIEFING);
        }
        let sources = merger.into_sources();

        debug!(topic, location, sources = sources.len(), "Briefing complete");

        Ok(CivicBriefing {
            topic: topic.trim().to_string(),
            location: location.trim().to_string(),
            summary: payload.summary,
            sources,
        })
    }

    /// Recall-oriented source search.
    ///
    /// A response with no text still yields its grounding citations.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>> {
        let request = build_search_request(query, &self.config).into_request();

        let response = self.model.generate(request).await?;
        let text = response.text().unwrap_or_default();

        let mut merger = GroundingMerger::new();
        merger
            .add_citations(&response.citations())
            .add_text_links(&text);
        let results = merger.into_sources();

        debug!(query, results = results.len(), "Search complete");
        Ok(results)
    }

    /// Simplify or translate; returns `text` unchanged on any failure.
    pub async fn transform(&self, text: &str, task: &TransformTask) -> String {
        transform_text(self.model.as_ref(), text, task, &self.config).await
    }

    /// Start a chat about a document.
    pub fn create_chat_session(&self, content: impl Into<String>, mime_type: &str) -> ChatSession {
        create_chat_session(
            self.model.clone(),
            &DocumentInput::classify(content, mime_type),
            self.config.temperature,
        )
    }
}
