//! Grounding citation merging.
//!
//! Structured grounding metadata is authoritative but sometimes incomplete;
//! response prose sometimes names extra sources. Both are merged into one
//! list, unique by exact link, with structured citations first.

use std::collections::HashSet;
use std::sync::LazyLock;

use gemini_client::Citation;
use regex::Regex;
use tracing::debug;

use crate::types::source::{SourceRef, PROVENANCE_GROUNDING, PROVENANCE_TEXT_LINK};

static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    // URL may hold one level of balanced parentheses, e.g. wiki titles
    Regex::new(r"\[([^\[\]]*)\]\(\s*((?:[^\s()]|\([^\s()]*\))+)\s*\)")
        .expect("markdown link pattern is valid")
});

/// Order-preserving, link-deduplicated citation list.
#[derive(Debug, Clone, Default)]
pub struct GroundingMerger {
    sources: Vec<SourceRef>,
    seen: HashSet<String>,
}

impl GroundingMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue merging into an existing result.
    pub fn with_existing(sources: Vec<SourceRef>) -> Self {
        let mut merger = Self::new();
        for source in sources {
            merger.push(source);
        }
        merger
    }

    /// Append unless the link is already present. Returns whether it was added.
    pub fn push(&mut self, source: SourceRef) -> bool {
        if !self.seen.insert(source.link.clone()) {
            return false;
        }
        self.sources.push(source);
        true
    }

    /// Add a raw `(title, link)` pair; unparseable links are skipped.
    pub fn push_link(&mut self, title: Option<&str>, link: &str, provenance: &str) -> bool {
        match SourceRef::from_link(link, title, provenance) {
            Some(source) => self.push(source),
            None => {
                debug!(link, "Skipping malformed citation link");
                false
            }
        }
    }

    /// Step 1: structured grounding citations.
    pub fn add_citations(&mut self, citations: &[Citation]) -> &mut Self {
        for citation in citations {
            self.push_link(citation.title.as_deref(), &citation.uri, PROVENANCE_GROUNDING);
        }
        self
    }

    /// Step 2: markdown links scraped from response text.
    pub fn add_text_links(&mut self, text: &str) -> &mut Self {
        for (title, link) in scrape_markdown_links(text) {
            self.push_link(Some(title), link, PROVENANCE_TEXT_LINK);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn into_sources(self) -> Vec<SourceRef> {
        self.sources
    }
}

/// All `[title](url)` occurrences in `text`, in order. URLs are not validated.
pub fn scrape_markdown_links(text: &str) -> Vec<(&str, &str)> {
    MARKDOWN_LINK
        .captures_iter(text)
        .filter_map(|caps| {
            let title = caps.get(1)?.as_str().trim();
            let link = caps.get(2)?.as_str();
            Some((title, link))
        })
        .collect()
}

/// Merge structured citations and text links into one deduplicated list.
pub fn merge_grounding(citations: &[Citation], text: &str) -> Vec<SourceRef> {
    let mut merger = GroundingMerger::new();
    merger.add_citations(citations).add_text_links(text);
    merger.into_sources()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(sources: &[SourceRef]) -> Vec<&str> {
        sources.iter().map(|s| s.link.as_str()).collect()
    }

    #[test]
    fn test_structured_wins_over_text_duplicate() {
        let citations = vec![Citation::new("https://a.gov", None)];
        let text = "See [Agenda](https://a.gov) and [Budget](https://b.gov).";

        let merged = merge_grounding(&citations, text);

        assert_eq!(links(&merged), vec!["https://a.gov", "https://b.gov"]);
        assert_eq!(merged[0].snippet, PROVENANCE_GROUNDING);
        assert_eq!(merged[0].title, "a.gov");
        assert_eq!(merged[1].snippet, PROVENANCE_TEXT_LINK);
        assert_eq!(merged[1].title, "Budget");
        assert_eq!(merged[1].source, "b.gov");
    }

    #[test]
    fn test_remerge_is_idempotent() {
        let citations = vec![
            Citation::new("https://a.gov/1", Some("One")),
            Citation::new("https://a.gov/2", Some("Two")),
        ];
        let text = "[Three](https://c.gov) [One again](https://a.gov/1)";

        let first = merge_grounding(&citations, text);

        let mut merger = GroundingMerger::with_existing(first.clone());
        merger.add_citations(&citations).add_text_links(text);
        let second = merger.into_sources();

        assert_eq!(first, second);
        assert_eq!(second.len(), 3);
    }

    #[test]
    fn test_order_structured_then_text_first_seen() {
        let citations = vec![
            Citation::new("https://z.gov", None),
            Citation::new("https://y.gov", None),
            Citation::new("https://z.gov", Some("dup")),
        ];
        let text = "[B](https://b.gov) [A](https://a.gov) [B2](https://b.gov) [Y](https://y.gov)";

        let merged = merge_grounding(&citations, text);

        assert_eq!(
            links(&merged),
            vec!["https://z.gov", "https://y.gov", "https://b.gov", "https://a.gov"]
        );
    }

    #[test]
    fn test_malformed_links_do_not_abort() {
        let text = "[Bad](notaurl) [Empty](http://) [Mail](mailto:clerk@town.gov) [Good](https://good.gov/x)";
        let merged = merge_grounding(&[], text);

        assert_eq!(links(&merged), vec!["https://good.gov/x"]);
    }

    #[test]
    fn test_malformed_structured_citation_skipped() {
        let citations = vec![
            Citation::new("not a url", Some("x")),
            Citation::new("https://ok.gov", Some("ok")),
        ];
        let merged = merge_grounding(&citations, "");
        assert_eq!(links(&merged), vec!["https://ok.gov"]);
    }

    #[test]
    fn test_scrape_handles_whitespace_and_empty_titles() {
        let found = scrape_markdown_links("- [ Minutes ]( https://t.gov/m ) and [](https://t.gov/e)");
        assert_eq!(found, vec![("Minutes", "https://t.gov/m"), ("", "https://t.gov/e")]);

        let merged = merge_grounding(&[], "[](https://t.gov/e)");
        assert_eq!(merged[0].title, "t.gov");
    }

    #[test]
    fn test_scrape_keeps_parentheses_in_url() {
        let text = "See [Town meeting](https://en.wikipedia.org/wiki/Town_meeting_(New_England)) (background).";
        let found = scrape_markdown_links(text);
        assert_eq!(
            found,
            vec![(
                "Town meeting",
                "https://en.wikipedia.org/wiki/Town_meeting_(New_England)"
            )]
        );

        let merged = merge_grounding(&[], text);
        assert_eq!(merged[0].source, "en.wikipedia.org");
    }

    #[test]
    fn test_push_reports_duplicates() {
        let mut merger = GroundingMerger::new();
        assert!(merger.push_link(None, "https://a.gov", PROVENANCE_GROUNDING));
        assert!(!merger.push_link(Some("again"), "https://a.gov", PROVENANCE_TEXT_LINK));
        assert_eq!(merger.len(), 1);
        assert!(!merger.is_empty());
    }
}
