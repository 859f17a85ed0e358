//! JSON recovery from noisy model output.
//!
//! Model text may be pure JSON, JSON inside markdown fences, JSON after search
//! commentary, or prose with no JSON at all. [`json_object_spans`] walks the
//! text with a brace-depth scanner that understands string literals and
//! escapes, so braces inside quoted values and braces in trailing prose do not
//! derail it. The first top-level span that parses as a JSON object wins.
//!
//! [`parse_analysis`] then back-fills every missing, mistyped or empty field
//! so a successful result never has an empty field.

use std::collections::{BTreeSet, HashSet};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DocumenterError, Result};
use crate::types::{AnalysisResult, Snippet, WordCloudEntry, UNREADABLE_SUMMARY};

pub const DEFAULT_TITLE: &str = "Untitled Document";
pub const DEFAULT_SUMMARY: &str = "No summary available.";
pub const DEFAULT_EXECUTIVE_SUMMARY: &str = "No executive summary available.";
pub const DEFAULT_HIGHLIGHT: &str = "No highlights could be extracted from this document.";
pub const DEFAULT_KEYWORD: &str = "Document";
pub const DEFAULT_SNIPPET: &str = "No quotes could be extracted from this document.";

/// Highlights used when the source could not be read and the model gave none.
pub const UNREADABLE_HIGHLIGHTS: &[&str] = &[
    "This link could not be read automatically.",
    "Download the document and upload the PDF directly for a full analysis.",
    "Or copy the document text and paste it in instead.",
];

const MAX_DERIVED_KEYWORDS: usize = 5;

/// Keys that identify an object as an analysis, snake_case aliases included.
const ANALYSIS_KEYS: &[&str] = &[
    "title",
    "summary",
    "executiveSummary",
    "executive_summary",
    "highlights",
    "wordCloud",
    "word_cloud",
    "snippets",
];

const STOPWORDS: &[&str] = &[
    "about", "after", "also", "from", "into", "meeting", "that", "their", "there", "these",
    "this", "with", "will", "which", "untitled",
];

/// Iterate top-level balanced `{...}` spans, left to right.
///
/// Braces within string literals are ignored and `\"` does not close a
/// string. Scanning resumes after each span's closing brace, so nested
/// objects are never yielded on their own. An unbalanced span ends the scan.
pub fn json_object_spans(text: &str) -> impl Iterator<Item = &str> {
    TopLevelSpans { text, pos: 0 }
}

struct TopLevelSpans<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for TopLevelSpans<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = self.pos + self.text.get(self.pos..)?.find('{')?;

        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;

        for (offset, c) in self.text[start..].char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }

            match c {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let end = start + offset + c.len_utf8();
                        self.pos = end;
                        return Some(&self.text[start..end]);
                    }
                }
                _ => {}
            }
        }

        // Truncated: nothing inside an open span is a top-level object
        self.pos = self.text.len();
        None
    }
}

/// First span of `text` that parses as a JSON object.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    json_object_spans(text).find_map(|span| match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    })
}

/// Recover an [`AnalysisResult`] from raw model text.
///
/// Fails with `MalformedOutput` when the text holds no top-level JSON object,
/// or when the object carries none of the analysis fields. A result is never
/// made only of defaults.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult> {
    let map = extract_json_object(text).ok_or_else(|| {
        debug!(len = text.len(), "No JSON object in model output");
        DocumenterError::malformed("no JSON object found in model output")
    })?;

    if !ANALYSIS_KEYS.iter().any(|key| map.contains_key(*key)) {
        debug!(keys = map.len(), "JSON object has no analysis fields");
        return Err(DocumenterError::malformed(
            "JSON object in model output has no analysis fields",
        ));
    }

    Ok(normalize_analysis(&map))
}

/// Back-fill an analysis object field by field.
pub fn normalize_analysis(map: &Map<String, Value>) -> AnalysisResult {
    let title = string_field(map, "title").unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let summary = string_field(map, "summary").unwrap_or_else(|| DEFAULT_SUMMARY.to_string());
    let executive_summary = string_field(map, "executiveSummary")
        .or_else(|| string_field(map, "executive_summary"))
        .unwrap_or_else(|| DEFAULT_EXECUTIVE_SUMMARY.to_string());

    let mut highlights = string_list(map.get("highlights"));
    if highlights.is_empty() {
        highlights = if summary == UNREADABLE_SUMMARY {
            UNREADABLE_HIGHLIGHTS.iter().map(|s| s.to_string()).collect()
        } else {
            vec![DEFAULT_HIGHLIGHT.to_string()]
        };
    }

    let mut word_cloud = word_cloud(map.get("wordCloud").or_else(|| map.get("word_cloud")));
    if word_cloud.is_empty() {
        word_cloud = keywords_from_title(&title);
    }

    let mut snippets = snippets(map.get("snippets"), &word_cloud);
    if snippets.is_empty() {
        snippets.push(Snippet {
            id: "snippet-1".to_string(),
            text: DEFAULT_SNIPPET.to_string(),
            page: 1,
            tags: word_cloud.iter().take(1).map(|w| w.text.clone()).collect(),
        });
    }

    AnalysisResult {
        title,
        summary,
        executive_summary,
        highlights,
        word_cloud,
        snippets,
    }
}

/// Trimmed, non-empty string value.
pub(crate) fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }
}

fn word_cloud(value: Option<&Value>) -> Vec<WordCloudEntry> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(entry) => Some((
                string_field(entry, "text").or_else(|| string_field(entry, "word"))?,
                integer(entry.get("weight")).unwrap_or(1),
            )),
            Value::String(s) if !s.trim().is_empty() => Some((s.trim().to_string(), 1)),
            _ => None,
        })
        .filter(|(text, _)| seen.insert(text.to_lowercase()))
        .map(|(text, weight)| WordCloudEntry {
            text,
            weight: weight.clamp(1, 5) as u8,
        })
        .collect()
}

fn keywords_from_title(title: &str) -> Vec<WordCloudEntry> {
    let mut seen = HashSet::new();
    let derived: Vec<WordCloudEntry> = title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 3)
        .filter(|w| !STOPWORDS.contains(&w.to_lowercase().as_str()))
        .filter(|w| seen.insert(w.to_lowercase()))
        .take(MAX_DERIVED_KEYWORDS)
        .map(|w| WordCloudEntry {
            text: w.to_string(),
            weight: 1,
        })
        .collect();

    if derived.is_empty() {
        vec![WordCloudEntry {
            text: DEFAULT_KEYWORD.to_string(),
            weight: 1,
        }]
    } else {
        derived
    }
}

fn snippets(value: Option<&Value>, word_cloud: &[WordCloudEntry]) -> Vec<Snippet> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|entry| {
            let text = string_field(entry, "text").or_else(|| string_field(entry, "quote"))?;
            let id = match entry.get("id") {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };
            let page = integer(entry.get("page")).unwrap_or(1).clamp(1, u32::MAX as i64) as u32;
            let tags: BTreeSet<String> = string_list(entry.get("tags")).into_iter().collect();
            Some((id, text, page, tags))
        })
        .enumerate()
        .map(|(n, (id, text, page, mut tags))| {
            if tags.is_empty() {
                tags = infer_tags(&text, word_cloud);
            }
            Snippet {
                id: id.unwrap_or_else(|| format!("snippet-{}", n + 1)),
                text,
                page,
                tags,
            }
        })
        .collect()
}

/// Word cloud terms that occur in `text`.
fn infer_tags(text: &str, word_cloud: &[WordCloudEntry]) -> BTreeSet<String> {
    let haystack = text.to_lowercase();
    word_cloud
        .iter()
        .filter(|w| haystack.contains(&w.text.to_lowercase()))
        .map(|w| w.text.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "title": "Select Board Minutes",
        "summary": "The board approved the budget.",
        "executiveSummary": "The board met and voted.",
        "highlights": ["Budget approved", "Park renamed"],
        "wordCloud": [{"text": "Budget", "weight": 5}, {"text": "Park", "weight": 2}],
        "snippets": [{"id": "s1", "text": "We approve the budget", "page": 3, "tags": ["Budget"]}]
    }"#;

    #[test]
    fn test_pure_json() {
        let result = parse_analysis(FULL).unwrap();
        assert_eq!(result.title, "Select Board Minutes");
        assert_eq!(result.highlights.len(), 2);
        assert_eq!(result.word_cloud[0].weight, 5);
        assert_eq!(result.snippets[0].page, 3);
    }

    #[test]
    fn test_fenced_json_with_prose() {
        let text = format!(
            "Based on my search, here is the analysis:\n```json\n{}\n```\nLet me know {{if}} you need more.",
            FULL
        );
        let result = parse_analysis(&text).unwrap();
        assert_eq!(result.summary, "The board approved the budget.");
    }

    #[test]
    fn test_braces_inside_strings() {
        let text = r#"{"title": "Use of {braces} and \"quotes\" }", "summary": "ok"} trailing }"#;
        let result = parse_analysis(text).unwrap();
        assert_eq!(result.title, r#"Use of {braces} and "quotes" }"#);
        assert_eq!(result.summary, "ok");
    }

    #[test]
    fn test_skips_non_json_brace_span() {
        let text = r#"Note {not json here} then {"title": "Real"}"#;
        let result = parse_analysis(text).unwrap();
        assert_eq!(result.title, "Real");
    }

    #[test]
    fn test_no_braces_is_malformed() {
        let err = parse_analysis("I could not access that document.").unwrap_err();
        assert!(matches!(err, DocumenterError::MalformedOutput { .. }));
    }

    #[test]
    fn test_unbalanced_is_malformed() {
        let err = parse_analysis(r#"{"title": "cut off"#).unwrap_err();
        assert!(matches!(err, DocumenterError::MalformedOutput { .. }));
    }

    #[test]
    fn test_truncated_output_is_malformed() {
        // Cut off mid-snippet; the complete inner snippet must not be taken
        // for the whole analysis
        let text = r#"{"title": "FY25 Budget", "summary": "Board voted", "snippets": [{"id": "s1", "text": "We approve", "page": 2, "tags": ["Budget"]}, {"id": "s2", "text": "cut of"#;
        let err = parse_analysis(text).unwrap_err();
        assert!(matches!(err, DocumenterError::MalformedOutput { .. }));
    }

    #[test]
    fn test_invalid_outer_object_is_malformed() {
        let text = r#"{"title": "Minutes", "summary": oops, "snippets": [{"id": "s1", "text": "quote", "page": 1}]}"#;
        let err = parse_analysis(text).unwrap_err();
        assert!(matches!(err, DocumenterError::MalformedOutput { .. }));
    }

    #[test]
    fn test_object_without_analysis_fields_is_malformed() {
        for text in ["{}", r#"Done: {"status": "ok"}"#] {
            let err = parse_analysis(text).unwrap_err();
            assert!(matches!(err, DocumenterError::MalformedOutput { .. }));
        }
    }

    #[test]
    fn test_spans_are_top_level_only() {
        let text = r#"a {"x": {"y": 1}} b {"z": "}"} c {"open": {"#;
        let spans: Vec<&str> = json_object_spans(text).collect();
        assert_eq!(spans, vec![r#"{"x": {"y": 1}}"#, r#"{"z": "}"}"#]);
    }

    #[test]
    fn test_many_unmatched_braces() {
        let text = format!("{}{{\"title\": \"Late\"}}", "{".repeat(50_000));
        assert!(json_object_spans(&text).next().is_none());
        assert!(parse_analysis(&text).is_err());
    }

    #[test]
    fn test_top_level_array_is_not_an_object() {
        assert!(extract_json_object(r#"[1, 2, 3]"#).is_none());
    }

    #[test]
    fn test_sparse_object_is_fully_backfilled() {
        let result = parse_analysis(r#"{"summary": "  "}"#).unwrap();

        assert_eq!(result.title, DEFAULT_TITLE);
        assert_eq!(result.summary, DEFAULT_SUMMARY);
        assert_eq!(result.executive_summary, DEFAULT_EXECUTIVE_SUMMARY);
        assert_eq!(result.highlights, vec![DEFAULT_HIGHLIGHT.to_string()]);
        assert!(!result.word_cloud.is_empty());
        assert!(!result.snippets.is_empty());
        assert!(result.snippets[0].tags.contains(&result.word_cloud[0].text));
    }

    #[test]
    fn test_wrong_types_are_backfilled() {
        let text = r#"{"title": 42, "summary": "  ", "highlights": "single", "wordCloud": "nope", "snippets": [{"page": 2}]}"#;
        let result = parse_analysis(text).unwrap();

        assert_eq!(result.title, DEFAULT_TITLE);
        assert_eq!(result.summary, DEFAULT_SUMMARY);
        assert_eq!(result.highlights, vec!["single".to_string()]);
        assert_eq!(result.word_cloud[0].text, DEFAULT_KEYWORD);
        assert_eq!(result.snippets[0].text, DEFAULT_SNIPPET);
    }

    #[test]
    fn test_word_cloud_weights_clamped_and_deduplicated() {
        let text = r#"{"wordCloud": [
            {"text": "Zoning", "weight": 9},
            {"text": "zoning", "weight": 3},
            {"text": "Parks", "weight": 0},
            {"text": "Taxes", "weight": "4"},
            {"text": "Roads", "weight": 2.6},
            "Schools",
            {"weight": 3}
        ]}"#;
        let result = parse_analysis(text).unwrap();
        let weights: Vec<(&str, u8)> = result
            .word_cloud
            .iter()
            .map(|w| (w.text.as_str(), w.weight))
            .collect();

        assert_eq!(
            weights,
            vec![("Zoning", 5), ("Parks", 1), ("Taxes", 4), ("Roads", 3), ("Schools", 1)]
        );
    }

    #[test]
    fn test_snippet_defaults_and_tag_inference() {
        let text = r#"{
            "wordCloud": [{"text": "Budget", "weight": 4}],
            "snippets": [
                {"text": "The budget is balanced", "page": 0},
                {"id": 7, "text": "Unrelated", "page": "5", "tags": []}
            ]
        }"#;
        let result = parse_analysis(text).unwrap();

        assert_eq!(result.snippets[0].id, "snippet-1");
        assert_eq!(result.snippets[0].page, 1);
        assert!(result.snippets[0].tags.contains("Budget"));
        assert_eq!(result.snippets[1].id, "7");
        assert_eq!(result.snippets[1].page, 5);
        assert!(result.snippets[1].tags.is_empty());
    }

    #[test]
    fn test_unreadable_gets_upload_suggestions() {
        let text = r#"{"title": "https://town.gov/minutes.pdf", "summary": "COULD_NOT_READ", "highlights": []}"#;
        let result = parse_analysis(text).unwrap();

        assert!(result.is_unreadable());
        assert_eq!(result.highlights.len(), UNREADABLE_HIGHLIGHTS.len());
        assert!(result.highlights.iter().any(|h| h.contains("upload")));
    }

    #[test]
    fn test_keywords_from_title() {
        let result = parse_analysis(r#"{"title": "Town Meeting Warrant for Capital Budget"}"#).unwrap();
        let words: Vec<&str> = result.keywords().collect();
        assert_eq!(words, vec!["Town", "Warrant", "Capital", "Budget"]);
    }

    #[test]
    fn test_multibyte_text_around_json() {
        let text = "Résumé — voilà: {\"title\": \"Café 財政\"} ✓";
        let result = parse_analysis(text).unwrap();
        assert_eq!(result.title, "Café 財政");
    }
}
