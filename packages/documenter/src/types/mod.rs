//! Data types for document operations.

pub mod analysis;
pub mod briefing;
pub mod input;
pub mod source;

pub use analysis::{AnalysisResult, Snippet, WordCloudEntry, UNREADABLE_SUMMARY};
pub use briefing::CivicBriefing;
pub use input::{is_binary_mime, DocumentInput, URL_ANALYSIS_SENTINEL};
pub use source::{SearchResultItem, SourceRef, PLACEHOLDER_DATE};
