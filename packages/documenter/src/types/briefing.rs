//! Civic briefing on a topic in a place.

use serde::{Deserialize, Serialize};

use super::source::SourceRef;

/// A search-grounded briefing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivicBriefing {
    pub topic: String,
    pub location: String,

    /// Markdown: issue framing, recent debate or action, current status
    pub summary: String,

    /// Grounding citations first, then payload citations; unique by link
    pub sources: Vec<SourceRef>,
}
