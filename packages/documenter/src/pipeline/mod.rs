//! Request shaping and response normalization.
//!
//! Everything here is pure: no network calls. The [`crate::Documenter`]
//! operations wire these steps around a [`crate::Model`] call.

pub mod briefing;
pub mod grounding;
pub mod prompts;
pub mod repair;
pub mod request;

pub use briefing::{parse_briefing_payload, BriefingPayload};
pub use grounding::{merge_grounding, scrape_markdown_links, GroundingMerger};
pub use repair::{extract_json_object, json_object_spans, normalize_analysis, parse_analysis};
pub use request::{
    build_analysis_request, build_briefing_request, build_search_request, OutputMode,
    PreparedRequest,
};
