//! Document analysis result and its response schema.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Summary value meaning "the source could not be read; nothing was analyzed".
pub const UNREADABLE_SUMMARY: &str = "COULD_NOT_READ";

// Doc comments below are sent to the model as schema descriptions.

/// Structured analysis of one civic document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Short, descriptive document title.
    pub title: String,

    /// Two or three sentence abstract of the document.
    pub summary: String,

    /// Professional executive summary of at most seven sentences.
    pub executive_summary: String,

    /// The ten most important points, decisions, or figures.
    pub highlights: Vec<String>,

    /// Key terms weighted by prominence.
    pub word_cloud: Vec<WordCloudEntry>,

    /// Verbatim quotes, tagged with word cloud terms.
    pub snippets: Vec<Snippet>,
}

/// A weighted keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordCloudEntry {
    /// Keyword or short phrase.
    pub text: String,

    /// Prominence from 1 (minor) to 5 (central).
    pub weight: u8,
}

/// A tagged quote from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Snippet {
    /// Stable identifier such as "s1".
    pub id: String,

    /// Exact quote from the document.
    pub text: String,

    /// Page number the quote appears on, starting at 1.
    pub page: u32,

    /// Word cloud terms this quote relates to.
    pub tags: BTreeSet<String>,
}

impl AnalysisResult {
    /// True when the model reported it could not read the source.
    pub fn is_unreadable(&self) -> bool {
        self.summary.trim() == UNREADABLE_SUMMARY
    }

    /// Word cloud vocabulary, in order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.word_cloud.iter().map(|w| w.text.as_str())
    }

    /// Snippets tagged with `keyword` (case-insensitive).
    pub fn snippets_tagged<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a Snippet> {
        self.snippets
            .iter()
            .filter(move |s| s.tags.iter().any(|t| t.eq_ignore_ascii_case(keyword)))
    }
}
