//! Request building for analysis, briefing and search.
//!
//! The provider cannot combine its web search tool with a response schema, so
//! a prepared request carries exactly one [`OutputMode`]. The illegal
//! combination has no representation.

use gemini_client::{
    Content, GenerateContentRequest, GenerationConfig, Part, StructuredOutput, Tool,
};
use tracing::debug;

use crate::config::DocumenterConfig;
use crate::pipeline::prompts::{
    format_analyze_prompt, format_briefing_prompt, format_search_prompt,
    format_url_analysis_prompt,
};
use crate::types::{AnalysisResult, DocumentInput};

/// How the model is allowed to shape its output.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMode {
    /// JSON constrained to a response schema; no tools.
    SchemaConstrained(serde_json::Value),

    /// Free text with provider-side tools enabled; no schema.
    SearchEnabled(Vec<Tool>),
}

impl OutputMode {
    /// Schema-constrained output for the analysis contract.
    pub fn analysis_schema() -> Self {
        Self::SchemaConstrained(AnalysisResult::response_schema())
    }

    /// Free text with web search.
    pub fn web_search() -> Self {
        Self::SearchEnabled(vec![Tool::google_search()])
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Self::SearchEnabled(_))
    }
}

/// A request ready to send, before it is lowered to the wire shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub contents: Vec<Content>,
    pub mode: OutputMode,
    pub temperature: Option<f32>,
}

impl PreparedRequest {
    /// Lower into a `generateContent` body.
    pub fn into_request(self) -> GenerateContentRequest {
        let request = GenerateContentRequest::new().contents(self.contents);

        match self.mode {
            OutputMode::SchemaConstrained(schema) => {
                let mut config = GenerationConfig::json_schema(schema);
                config.temperature = self.temperature;
                request.generation_config(config)
            }
            OutputMode::SearchEnabled(tools) => {
                let request = tools.into_iter().fold(request, |r, tool| r.tool(tool));
                match self.temperature {
                    Some(temperature) => request.generation_config(GenerationConfig {
                        temperature: Some(temperature),
                        ..Default::default()
                    }),
                    None => request,
                }
            }
        }
    }
}

/// Build the analysis request for any input mode.
///
/// - Binary: inline document part + instruction, schema-constrained.
/// - URL: search-delegation instruction, web search, no schema.
/// - Text: document text + instruction, schema-constrained.
pub fn build_analysis_request(input: &DocumentInput, config: &DocumenterConfig) -> PreparedRequest {
    let (parts, mode) = match input {
        DocumentInput::Url(url) => (
            vec![Part::text(format_url_analysis_prompt(
                url,
                config.highlight_count,
            ))],
            OutputMode::web_search(),
        ),
        DocumentInput::Binary { .. } | DocumentInput::Text(_) => (
            vec![
                input.document_part(),
                Part::text(format_analyze_prompt(config.highlight_count)),
            ],
            OutputMode::analysis_schema(),
        ),
    };

    debug!(
        input = input.kind(),
        search = mode.is_search(),
        "Built analysis request"
    );

    PreparedRequest {
        contents: vec![Content::user(parts)],
        mode,
        temperature: config.temperature,
    }
}

/// Build the search-grounded briefing request.
pub fn build_briefing_request(
    topic: &str,
    location: &str,
    config: &DocumenterConfig,
) -> PreparedRequest {
    PreparedRequest {
        contents: vec![Content::user(vec![Part::text(format_briefing_prompt(
            topic, location,
        ))])],
        mode: OutputMode::web_search(),
        temperature: config.temperature,
    }
}

/// Build the source search request.
pub fn build_search_request(query: &str, config: &DocumenterConfig) -> PreparedRequest {
    PreparedRequest {
        contents: vec![Content::user(vec![Part::text(format_search_prompt(query))])],
        mode: OutputMode::web_search(),
        temperature: config.temperature,
    }
}
