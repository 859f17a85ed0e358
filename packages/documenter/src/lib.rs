//! Civic Document Orchestration Library
//!
//! Turns public documents (agendas, minutes, budgets, ordinances) into
//! structured, readable output by driving a generative model.
//!
//! # Design Philosophy
//!
//! - The model is allowed to be sloppy; this crate makes its output safe
//! - Every field of an analysis is present and non-empty
//! - Search grounding and schema-constrained output are never combined
//! - Pure request/response shaping, one model call per operation
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use documenter::{Documenter, GeminiClient};
//!
//! let documenter = Documenter::new(Arc::new(GeminiClient::from_env()?));
//!
//! let analysis = documenter.analyze(pdf_base64, "application/pdf").await?;
//! let briefing = documenter.brief("zoning", "Brookline, MA").await?;
//!
//! let mut chat = documenter.create_chat_session(pdf_base64, "application/pdf");
//! let answer = chat.send_message("When is the public hearing?").await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The [`Model`] abstraction
//! - [`types`] - Inputs and normalized results
//! - [`pipeline`] - Request builders, JSON repair, grounding merge
//! - [`session`] - Document-grounded chat
//! - [`transform`] - Simplify and translate
//! - [`accessibility`] - Reader display preferences
//! - [`projects`] - Static catalog of related civic tools
//! - [`testing`] - Mock model for tests

pub mod accessibility;
pub mod ai;
pub mod config;
pub mod documenter;
pub mod error;
pub mod pipeline;
pub mod projects;
pub mod session;
pub mod testing;
pub mod traits;
pub mod transform;
pub mod types;

// Re-export core types at crate root
pub use accessibility::{A11ySettings, Feature, Language};
pub use config::DocumenterConfig;
pub use documenter::Documenter;
pub use error::{DocumenterError, Result};
pub use projects::{Category, Project};
pub use session::{create_chat_session, ChatRole, ChatSession, ChatTurn};
pub use traits::Model;
pub use transform::{transform_text, TransformTask};
pub use types::{
    AnalysisResult, CivicBriefing, DocumentInput, SearchResultItem, Snippet, SourceRef,
    WordCloudEntry,
};

// Re-export pipeline components
pub use pipeline::{
    build_analysis_request, build_briefing_request, build_search_request, extract_json_object,
    merge_grounding, normalize_analysis, parse_analysis, GroundingMerger, OutputMode,
    PreparedRequest,
};

pub use gemini_client::GeminiClient;
