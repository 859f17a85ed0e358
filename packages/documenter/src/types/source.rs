//! Citation records shared by briefings and search.

use serde::{Deserialize, Serialize};
use url::Url;

/// Placeholder for `date`; citations carry no verified publication date.
pub const PLACEHOLDER_DATE: &str = "Recent";

/// Provenance note for citations from structured grounding metadata.
pub const PROVENANCE_GROUNDING: &str = "Cited by search grounding";

/// Provenance note for sources listed in a briefing payload.
pub const PROVENANCE_BRIEFING: &str = "Referenced in briefing";

/// Provenance note for markdown links scraped from response text.
pub const PROVENANCE_TEXT_LINK: &str = "Linked in search summary";

/// A cited web source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,

    /// Absolute URL
    pub link: String,

    /// Where this citation came from (not a quote)
    pub snippet: String,

    /// Hostname of `link`
    pub source: String,

    pub date: String,
}

/// Search results share the citation shape.
pub type SearchResultItem = SourceRef;

impl SourceRef {
    /// Build a citation from a raw link.
    ///
    /// Returns `None` unless `link` parses as an absolute URL with a host.
    /// A missing or blank title falls back to the hostname.
    pub fn from_link(link: &str, title: Option<&str>, provenance: &str) -> Option<Self> {
        let link = link.trim();
        let parsed = Url::parse(link).ok()?;
        let host = parsed.host_str()?.to_string();

        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| host.clone());

        Some(Self {
            title,
            link: link.to_string(),
            snippet: provenance.to_string(),
            source: host,
            date: PLACEHOLDER_DATE.to_string(),
        })
    }
}
