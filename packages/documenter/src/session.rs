//! Document-grounded chat sessions.
//!
//! A session is seeded with two turns: the user handing over the document,
//! and the model acknowledging it. Every later question is answered under a
//! fixed system instruction that restricts the model to that document.

use std::sync::Arc;

use gemini_client::{Content, GenerateContentRequest, GenerationConfig, Part};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DocumenterError, Result};
use crate::pipeline::prompts::{CHAT_ACKNOWLEDGEMENT, CHAT_OPENING, CHAT_SYSTEM_INSTRUCTION};
use crate::traits::Model;
use crate::types::DocumentInput;

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One exchanged message, as a caller would persist or replay it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    fn into_content(self) -> Content {
        match self.role {
            ChatRole::User => Content::user(vec![Part::text(self.text)]),
            ChatRole::Model => Content::model(self.text),
        }
    }
}

/// A stateful conversation about one document.
///
/// Owned by the caller; nothing is persisted.
pub struct ChatSession {
    id: Uuid,
    model: Arc<dyn Model>,
    history: Vec<Content>,
    temperature: Option<f32>,
}

impl ChatSession {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Full history, seed turns included.
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Replay earlier turns on top of the seed.
    pub fn with_turns(mut self, turns: impl IntoIterator<Item = ChatTurn>) -> Self {
        self.history
            .extend(turns.into_iter().map(ChatTurn::into_content));
        self
    }

    /// Ask a question. History is only extended when the model answers.
    pub async fn send_message(&mut self, message: impl Into<String>) -> Result<String> {
        let question = Content::user(vec![Part::text(message.into())]);

        let mut request = GenerateContentRequest::new()
            .contents(self.history.iter().cloned())
            .content(question.clone())
            .system_instruction(CHAT_SYSTEM_INSTRUCTION);
        if let Some(temperature) = self.temperature {
            request = request.generation_config(GenerationConfig {
                temperature: Some(temperature),
                ..Default::default()
            });
        }

        let response = self.model.generate(request).await?;
        let reply = response
            .text()
            .ok_or_else(|| DocumenterError::malformed("chat reply had no text"))?;

        debug!(session = %self.id, turns = self.history.len() + 2, "Chat reply");

        self.history.push(question);
        self.history.push(Content::model(reply.clone()));
        Ok(reply)
    }
}

/// Seed a session with the document and the assistant persona.
///
/// The document is not validated; an empty document gives a session that can
/// only say it doesn't know.
pub fn create_chat_session(
    model: Arc<dyn Model>,
    document: &DocumentInput,
    temperature: Option<f32>,
) -> ChatSession {
    let seed = vec![
        Content::user(vec![document.document_part(), Part::text(CHAT_OPENING)]),
        Content::model(CHAT_ACKNOWLEDGEMENT),
    ];

    let session = ChatSession {
        id: Uuid::new_v4(),
        model,
        history: seed,
        temperature,
    };

    debug!(session = %session.id, input = document.kind(), "Created chat session");
    session
}
