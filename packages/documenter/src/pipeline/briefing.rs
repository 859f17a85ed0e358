//! Briefing payload parsing.

use serde_json::Value;

use crate::error::{DocumenterError, Result};
use crate::pipeline::repair::{extract_json_object, string_field};

/// The JSON a briefing response is asked to contain.
#[derive(Debug, Clone, PartialEq)]
pub struct BriefingPayload {
    /// Markdown summary
    pub summary: String,

    /// `(title, link)` pairs, unvalidated
    pub sources: Vec<(Option<String>, String)>,
}

/// Pull the briefing payload out of search-augmented model text.
///
/// A missing JSON object or a missing/empty `summary` is `MalformedOutput`.
/// Source entries without a link are dropped; `url` and `uri` are accepted as
/// aliases for `link`.
pub fn parse_briefing_payload(text: &str) -> Result<BriefingPayload> {
    let map = extract_json_object(text)
        .ok_or_else(|| DocumenterError::malformed("no JSON object found in briefing output"))?;

    let summary = string_field(&map, "summary")
        .ok_or_else(|| DocumenterError::malformed("briefing output has no summary"))?;

    let sources = match map.get("sources") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|entry| {
                let link = ["link", "url", "uri"]
                    .iter()
                    .find_map(|key| string_field(entry, key))?;
                Some((string_field(entry, "title"), link))
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(BriefingPayload { summary, sources })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_payload_after_commentary() {
        let text = r#"I searched for recent coverage.
```json
{"summary": "Para one.\n\nPara two.\n\nPara three.", "sources": [
  {"title": "Town news", "link": "https://news.town.gov/a"},
  {"url": "https://b.gov"},
  {"title": "no link"}
]}
```"#;

        let payload = parse_briefing_payload(text).unwrap();

        assert_eq!(payload.summary.matches("\n\n").count(), 2);
        assert_eq!(
            payload.sources,
            vec![
                (Some("Town news".to_string()), "https://news.town.gov/a".to_string()),
                (None, "https://b.gov".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_summary_is_malformed() {
        let err = parse_briefing_payload(r#"{"sources": []}"#).unwrap_err();
        assert!(matches!(err, DocumenterError::MalformedOutput { .. }));
    }

    #[test]
    fn test_prose_only_is_malformed() {
        let err = parse_briefing_payload("No recent news was found.").unwrap_err();
        assert!(matches!(err, DocumenterError::MalformedOutput { .. }));
    }

    #[test]
    fn test_sources_optional() {
        let payload = parse_briefing_payload(r#"{"summary": "Only text"}"#).unwrap();
        assert!(payload.sources.is_empty());
    }
}
