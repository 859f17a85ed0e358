//! Plain-language rewriting and translation.
//!
//! Best effort: any failure hands back the caller's original text.

use gemini_client::{Content, GenerateContentRequest, GenerationConfig, Part};
use tracing::warn;

use crate::config::DocumenterConfig;
use crate::error::{DocumenterError, Result};
use crate::pipeline::prompts::{format_simplify_prompt, format_translate_prompt};
use crate::traits::Model;

/// What to do with the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformTask {
    Simplify,
    Translate { language: String },
}

impl TransformTask {
    /// Parse the loose `task` / `option` pair used by HTTP callers.
    pub fn parse(task: &str, option: Option<&str>) -> Result<Self> {
        match task.trim().to_ascii_lowercase().as_str() {
            "simplify" => Ok(Self::Simplify),
            "translate" => {
                let language = option
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .ok_or_else(|| {
                        DocumenterError::invalid_input("translate requires a target language")
                    })?;
                Ok(Self::Translate {
                    language: language.to_string(),
                })
            }
            other => Err(DocumenterError::invalid_input(format!(
                "unknown transform task: {other}"
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Simplify => "simplify",
            Self::Translate { .. } => "translate",
        }
    }
}

/// Build the single-turn transform request.
pub fn build_transform_request(
    text: &str,
    task: &TransformTask,
    config: &DocumenterConfig,
) -> GenerateContentRequest {
    let prompt = match task {
        TransformTask::Simplify => format_simplify_prompt(text),
        TransformTask::Translate { language } => format_translate_prompt(text, language),
    };

    let request = GenerateContentRequest::new().content(Content::user(vec![Part::text(prompt)]));
    match config.transform_temperature {
        Some(temperature) => request.generation_config(GenerationConfig {
            temperature: Some(temperature),
            ..Default::default()
        }),
        None => request,
    }
}

/// Rewrite `text`, returning it unchanged if anything goes wrong.
pub async fn transform_text(
    model: &dyn Model,
    text: &str,
    task: &TransformTask,
    config: &DocumenterConfig,
) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let request = build_transform_request(text, task, config);

    match model.generate(request).await {
        Ok(response) => match response.text() {
            Some(rewritten) if !rewritten.trim().is_empty() => rewritten.trim().to_string(),
            _ => {
                warn!(task = task.name(), "Transform returned no text, keeping original");
                text.to_string()
            }
        },
        Err(e) => {
            warn!(task = task.name(), error = %e, "Transform failed, keeping original");
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockModel;

    #[test]
    fn test_parse_tasks() {
        assert_eq!(TransformTask::parse("simplify", None).unwrap(), TransformTask::Simplify);
        assert_eq!(
            TransformTask::parse("Translate", Some(" Spanish ")).unwrap(),
            TransformTask::Translate {
                language: "Spanish".into()
            }
        );
    }

    #[test]
    fn test_translate_requires_language() {
        for option in [None, Some(""), Some("   ")] {
            let err = TransformTask::parse("translate", option).unwrap_err();
            assert!(matches!(err, DocumenterError::InvalidInput { .. }));
        }
    }

    #[test]
    fn test_unknown_task_rejected() {
        assert!(TransformTask::parse("summarize", None).is_err());
    }

    #[test]
    fn test_request_uses_template() {
        let request = build_transform_request(
            "Budget up 4%",
            &TransformTask::Translate {
                language: "Haitian Creole".into(),
            },
            &DocumenterConfig::default(),
        );
        let prompt = request.contents[0].text();

        assert!(prompt.contains("Haitian Creole"));
        assert!(prompt.contains("Budget up 4%"));
        assert!(request.tools.is_empty());
        assert!(!request.has_response_schema());
    }

    #[tokio::test]
    async fn test_success_returns_rewrite() {
        let model = MockModel::new().with_text("  The town will spend more.  ");
        let out = transform_text(
            &model,
            "Appropriations shall increase.",
            &TransformTask::Simplify,
            &DocumenterConfig::default(),
        )
        .await;

        assert_eq!(out, "The town will spend more.");
    }

    #[tokio::test]
    async fn test_failure_returns_original() {
        let model = MockModel::new().with_error(DocumenterError::Upstream {
            status: 500,
            message: "boom".into(),
            details: None,
        });
        let original = "Appropriations shall increase.";

        let out = transform_text(&model, original, &TransformTask::Simplify, &DocumenterConfig::default())
            .await;

        assert_eq!(out, original);
    }

    #[tokio::test]
    async fn test_empty_reply_returns_original() {
        let model = MockModel::new().with_response(Default::default());
        let out = transform_text(
            &model,
            "Keep me",
            &TransformTask::Translate {
                language: "French".into(),
            },
            &DocumenterConfig::default(),
        )
        .await;

        assert_eq!(out, "Keep me");
    }

    #[tokio::test]
    async fn test_blank_input_skips_model() {
        let model = MockModel::new();
        let out = transform_text(&model, "  ", &TransformTask::Simplify, &DocumenterConfig::default()).await;

        assert_eq!(out, "  ");
        assert_eq!(model.call_count(), 0);
    }
}
