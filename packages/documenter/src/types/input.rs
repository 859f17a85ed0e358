//! Document input modes.

use base64::Engine;
use gemini_client::Part;

/// Prefix marking text input as "resolve this URL via search".
pub const URL_ANALYSIS_SENTINEL: &str = "URL_ANALYSIS_REQUEST:";

/// A document as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentInput {
    /// Base64-encoded PDF or image
    Binary { mime_type: String, data: String },

    /// Pasted or extracted text
    Text(String),

    /// A URL the model has to locate with its own search tool
    Url(String),
}

impl DocumentInput {
    /// Classify raw `content` by MIME type and the URL sentinel.
    pub fn classify(content: impl Into<String>, mime_type: &str) -> Self {
        let content = content.into();

        if is_binary_mime(mime_type) {
            return Self::Binary {
                mime_type: mime_type.trim().to_ascii_lowercase(),
                data: content,
            };
        }

        match content.trim_start().strip_prefix(URL_ANALYSIS_SENTINEL) {
            Some(rest) => Self::Url(rest.trim().to_string()),
            None => Self::Text(content),
        }
    }

    /// Build input from raw bytes, base64-encoding binary documents.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        if is_binary_mime(mime_type) {
            Self::Binary {
                mime_type: mime_type.trim().to_ascii_lowercase(),
                data: base64::engine::general_purpose::STANDARD.encode(bytes),
            }
        } else {
            Self::classify(String::from_utf8_lossy(bytes).into_owned(), mime_type)
        }
    }

    /// Sentinel-prefixed text for a URL, as a browser client would send it.
    pub fn url_marker(url: &str) -> String {
        format!("{} {}", URL_ANALYSIS_SENTINEL, url.trim())
    }

    /// Content part carrying the document itself.
    pub fn document_part(&self) -> Part {
        match self {
            Self::Binary { mime_type, data } => Part::inline_data(mime_type, data),
            Self::Text(text) => Part::text(text),
            Self::Url(url) => Part::text(format!("Document URL: {}", url)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Binary { .. } => "binary",
            Self::Text(_) => "text",
            Self::Url(_) => "url",
        }
    }
}

/// PDFs and images are sent inline; everything else is treated as text.
pub fn is_binary_mime(mime_type: &str) -> bool {
    let mime = mime_type.trim().to_ascii_lowercase();
    mime == "application/pdf" || mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_and_images_are_binary() {
        assert!(is_binary_mime("application/pdf"));
        assert!(is_binary_mime("image/png"));
        assert!(is_binary_mime(" IMAGE/JPEG "));
        assert!(!is_binary_mime("text/plain"));
        assert!(!is_binary_mime(""));
    }

    #[test]
    fn test_classify_url_sentinel() {
        let input = DocumentInput::classify(
            "URL_ANALYSIS_REQUEST: https://town.gov/minutes.pdf",
            "text/plain",
        );
        assert_eq!(input, DocumentInput::Url("https://town.gov/minutes.pdf".into()));
    }

    #[test]
    fn test_binary_mime_wins_over_sentinel() {
        let input = DocumentInput::classify("URL_ANALYSIS_REQUEST: x", "application/pdf");
        assert_eq!(input.kind(), "binary");
    }

    #[test]
    fn test_plain_text() {
        let input = DocumentInput::classify("Minutes of the select board", "text/plain");
        assert_eq!(input, DocumentInput::Text("Minutes of the select board".into()));
    }

    #[test]
    fn test_from_bytes_encodes_binary() {
        let input = DocumentInput::from_bytes(b"%PDF-1.4", "application/pdf");
        assert_eq!(
            input,
            DocumentInput::Binary {
                mime_type: "application/pdf".into(),
                data: "JVBERi0xLjQ=".into(),
            }
        );
    }

    #[test]
    fn test_url_marker_round_trips() {
        let marker = DocumentInput::url_marker("https://a.gov/agenda");
        let input = DocumentInput::classify(marker, "text/plain");
        assert_eq!(input, DocumentInput::Url("https://a.gov/agenda".into()));
    }
}
