//! Axum route handlers for the resume chat API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(alias = "question")]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/resume-chat
///
/// Answers a visitor's question about the resume. The upstream call is
/// cancelled if the client disconnects, since axum drops this future.
#[tracing::instrument(name = "resume_chat", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_resume_chat(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let reply = state.relay.answer(&request.message).await?;
    Ok(Json(ChatResponse { reply }))
}
