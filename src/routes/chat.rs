use axum::{Json, body::Bytes, extract::State};
use tracing::{error, info};

use crate::{
    error::AppError,
    message::{ChatResponse, Turn},
    state::SharedState,
};

/// Relay a conversation to the generation service and return the reply.
///
/// The body is taken raw so an absent body and a malformed `messages` field
/// can be told apart. Validation runs in order: body present, `messages`
/// present and an array, every element a known-role turn. One upstream call,
/// no retry.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    if body.is_empty() {
        return Err(AppError::MissingBody);
    }

    let value: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidMessages(format!("body is not valid JSON: {e}")))?;

    let messages = value
        .get("messages")
        .ok_or_else(|| AppError::InvalidMessages("`messages` field is required".to_string()))?;

    if !messages.is_array() {
        return Err(AppError::InvalidMessages("`messages` must be an array".to_string()));
    }

    let turns: Vec<Turn> = serde_json::from_value(messages.clone())
        .map_err(|e| AppError::InvalidMessages(e.to_string()))?;

    info!(turns = turns.len(), "relaying conversation");

    let reply = state.generator.generate(&turns).await.map_err(|e| {
        error!(error = %e, "upstream call failed");
        AppError::UpstreamFailure(e.to_string())
    })?;

    Ok(Json(ChatResponse { response: reply }))
}
