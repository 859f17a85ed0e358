//! JSON routes for the document operations.

use axum::{extract::Extension, Json};
use documenter::{AnalysisResult, ChatTurn, CivicBriefing, SearchResultItem, TransformTask};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    content: String,
    mime_type: String,
}

#[derive(Deserialize)]
pub struct BriefingRequest {
    topic: String,
    location: String,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    query: String,
}

#[derive(Deserialize)]
pub struct TransformRequest {
    text: String,
    task: String,
    option: Option<String>,
}

#[derive(Serialize)]
pub struct TransformResponse {
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    content: String,
    mime_type: String,
    #[serde(default)]
    history: Vec<ChatTurn>,
    message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    reply: String,
}

pub async fn analyze_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let result = state
        .documenter()?
        .analyze(req.content, &req.mime_type)
        .await?;
    Ok(Json(result))
}

pub async fn briefing_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<BriefingRequest>,
) -> Result<Json<CivicBriefing>, ApiError> {
    let briefing = state
        .documenter()?
        .brief(&req.topic, &req.location)
        .await?;
    Ok(Json(briefing))
}

pub async fn search_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Vec<SearchResultItem>>, ApiError> {
    let results = state.documenter()?.search(&req.query).await?;
    Ok(Json(results))
}

/// Always answers with text; model failures return the input unchanged.
pub async fn transform_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<TransformRequest>,
) -> Result<Json<TransformResponse>, ApiError> {
    let task = TransformTask::parse(&req.task, req.option.as_deref())?;
    let text = state.documenter()?.transform(&req.text, &task).await;
    Ok(Json(TransformResponse { text }))
}

/// Sessions are not kept server side; the client sends its history back.
pub async fn chat_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let mut session = state
        .documenter()?
        .create_chat_session(req.content, &req.mime_type)
        .with_turns(req.history);
    let reply = session.send_message(req.message).await?;
    Ok(Json(ChatResponse { reply }))
}
