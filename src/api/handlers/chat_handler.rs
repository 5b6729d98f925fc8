use axum::{
    Json,
    extract::{Extension, State},
    response::IntoResponse,
};
use tracing::{debug, error};

use crate::{
    api::{app_state::AppState, dto::chat_dto::*},
    engine::synthesizer::SERVICE_TROUBLE_REPLY,
    error::AppError,
    models::Session,
};

/// 处理一条对话消息
///
/// 输入错误按 400 返回；其余内部错误仍返回 200 和固定回复，并带上 `error: true`。
pub async fn chat(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Chat message for session {}: {} chars",
        session.id,
        request.message.chars().count()
    );

    match state
        .chat_service
        .handle_chat(&session.id, &request.message)
        .await
    {
        Ok(reply) => {
            state.metrics().record_chat(reply.is_fallback);
            Ok(Json(ChatResponse {
                message: reply.message,
                is_fallback: reply.is_fallback,
                error: None,
            }))
        }
        Err(e) if e.is_input_error() => Err(e),
        Err(e) => {
            error!(error = %e, session_id = %session.id, "chat request failed");
            state.metrics().record_error();
            state.metrics().record_chat(true);
            Ok(Json(ChatResponse {
                message: SERVICE_TROUBLE_REPLY.to_string(),
                is_fallback: true,
                error: Some(true),
            }))
        }
    }
}

pub async fn get_history(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Fetching history for session {}", session.id);

    let turns = state.chat_service.history(&session.id).await?;
    let total = turns.len();

    Ok(Json(HistoryResponse {
        turns: turns.into_iter().map(TurnResponse::from).collect(),
        total,
    }))
}
