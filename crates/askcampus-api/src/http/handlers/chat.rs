//! The chat endpoint.
//!
//! POST /api/chat
//!
//! Body: `{"sessionId": string, "message": string}`. Returns
//! `{"reply": string}` on success. Both fields are deserialized as optional
//! so that absent and empty fields fail identically through the
//! orchestrator's validation, with no store access.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Success response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/chat -- one exchange per call.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = body.session_id.as_deref().unwrap_or("");
    let message = body.message.as_deref().unwrap_or("");

    let reply = state.chat_service.handle_chat(session_id, message).await?;

    Ok(Json(ChatResponse { reply }))
}
