use axum::{
    Json,
    extract::{Extension, Multipart, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::report_dto::*},
    error::AppError,
    models::Session,
};

/// 分析上传的报告文件（multipart 字段 `file`）
pub async fn analyze_report(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    debug!(
        "Report upload for session {}: {} ({} bytes)",
        session.id,
        filename,
        bytes.len()
    );

    let reply = state
        .report_service
        .analyze_report(&session.id, &filename, &bytes)
        .await?;
    state.metrics().record_report(reply.is_fallback);

    Ok(Json(ReportResponse {
        analysis: reply.analysis,
        is_fallback: reply.is_fallback,
    }))
}
