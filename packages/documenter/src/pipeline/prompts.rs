//! LLM prompts for document operations.
//!
//! Placeholders in `{braces}` are filled by the `format_*` functions.

/// Instruction sent alongside an inline or pasted document.
pub const ANALYZE_PROMPT: &str = r#"You are a civic document analyst helping residents understand local government records.

Analyze the attached document and produce:
- title: a short, descriptive title
- summary: a 2-3 sentence plain-language abstract
- executiveSummary: a professional executive summary of no more than 7 sentences
- highlights: exactly {highlight_count} of the most important points, decisions, votes, dates, or dollar figures
- wordCloud: 15-25 key terms, each weighted 1 (minor) to 5 (central)
- snippets: 5-10 exact quotes with the page they appear on (use 1 for unpaginated text), each tagged with one or more wordCloud terms

Only use information found in the document."#;

/// Instruction for a URL the model cannot fetch directly.
///
/// No response schema is attached in this mode, so the JSON shape is spelled out.
pub const URL_ANALYSIS_PROMPT: &str = r#"You are a civic document analyst helping residents understand local government records.

A resident wants an analysis of the document at this URL:
{url}

You cannot open the URL directly. Use Google Search to find the actual content of this document (meeting minutes, agenda, report, ordinance, or similar) and analyze what you find.

Respond with ONLY a JSON object, no commentary, in exactly this shape:
{
  "title": "short descriptive title",
  "summary": "2-3 sentence plain-language abstract",
  "executiveSummary": "professional executive summary, at most 7 sentences",
  "highlights": ["{highlight_count} most important points"],
  "wordCloud": [{"text": "term", "weight": 1}],
  "snippets": [{"id": "s1", "text": "exact quote", "page": 1, "tags": ["term"]}]
}

Weights run from 1 to 5. Every snippet tag must be a wordCloud term.

If you cannot find the real content of this document, set "summary" to exactly "COULD_NOT_READ", use the URL as the title, and fill "highlights" with suggestions for the resident, such as downloading the file and uploading it directly."#;

/// Search-grounded briefing on a civic topic.
pub const BRIEFING_PROMPT: &str = r#"You are a nonpartisan civic reporter. Use Google Search to research the topic "{topic}" in {location}.

Write a briefing in markdown with exactly three paragraphs:
1. What the issue is and why it matters to residents
2. Recent debate, votes, or actions by local officials and community groups
3. Where things stand now and what happens next

Respond with ONLY a JSON object, no commentary:
{
  "summary": "the three-paragraph markdown briefing",
  "sources": [{"title": "source title", "link": "https://..."}]
}"#;

/// Recall-oriented source search.
pub const SEARCH_PROMPT: &str = r#"Use Google Search to find official and reputable sources about: {query}

Prefer municipal websites, meeting minutes, agendas, budgets, and local news.
List every relevant source as a markdown link on its own line, in the form:
- [Source title](https://full.url) - one sentence on why it is relevant"#;

/// Persona for document chat sessions.
pub const CHAT_SYSTEM_INSTRUCTION: &str = r#"You are a helpful civic assistant. Answer questions using ONLY the document the user shared at the start of this conversation. Use simple, clear, concise language that any resident can understand. If the document does not contain the answer, say that you don't know based on this document. Do not speculate or use outside knowledge."#;

/// Opening line of the seeded user turn.
pub const CHAT_OPENING: &str = "Here is the document I want to ask questions about.";

/// Seeded model acknowledgement.
pub const CHAT_ACKNOWLEDGEMENT: &str =
    "I have read the document. What would you like to know about it?";

/// Plain-language rewrite.
pub const SIMPLIFY_PROMPT: &str = r#"Rewrite the following text in plain language at about a 6th grade reading level. Keep every fact, number, and date. Use short sentences. Return only the rewritten text.

Text:
{text}"#;

/// Translation.
pub const TRANSLATE_PROMPT: &str = r#"Translate the following text into {language}. Keep names, numbers, dates, and markdown formatting intact. Return only the translation.

Text:
{text}"#;

pub fn format_analyze_prompt(highlight_count: usize) -> String {
    ANALYZE_PROMPT.replace("{highlight_count}", &highlight_count.to_string())
}

pub fn format_url_analysis_prompt(url: &str, highlight_count: usize) -> String {
    URL_ANALYSIS_PROMPT
        .replace("{url}", url)
        .replace("{highlight_count}", &highlight_count.to_string())
}

pub fn format_briefing_prompt(topic: &str, location: &str) -> String {
    BRIEFING_PROMPT
        .replace("{topic}", topic.trim())
        .replace("{location}", location.trim())
}

pub fn format_search_prompt(query: &str) -> String {
    SEARCH_PROMPT.replace("{query}", query.trim())
}

pub fn format_simplify_prompt(text: &str) -> String {
    SIMPLIFY_PROMPT.replace("{text}", text)
}

pub fn format_translate_prompt(text: &str, language: &str) -> String {
    TRANSLATE_PROMPT
        .replace("{language}", language.trim())
        .replace("{text}", text)
}
