//! Handlers for the `/sessions` resource and artifact download.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use promo_core::error::CoreError;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::session::SessionInfo;
use crate::state::AppState;

/// POST /api/v1/sessions
pub async fn create(
    State(state): State<AppState>,
) -> (StatusCode, Json<DataResponse<SessionInfo>>) {
    let info = state.sessions.create().await;
    (StatusCode::CREATED, Json(DataResponse { data: info }))
}

/// GET /api/v1/sessions/{id}
///
/// Reports whether an artifact is ready, with its details.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<SessionInfo>>> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.touch();
    Ok(Json(DataResponse {
        data: session.info(),
    }))
}

/// DELETE /api/v1/sessions/{id}
///
/// Ends the session and drops any held artifact.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/{id}/video
///
/// Returns the held MP4 as an attachment. May be called any number of
/// times; 404 when nothing has been generated yet.
pub async fn download_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.touch();

    let artifact = session.artifact().ok_or(AppError::Core(CoreError::NotFound {
        entity: "Video",
        id: id.to_string(),
    }))?;

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    let bytes = artifact.bytes.clone();
    tracing::debug!(session_id = %id, size_bytes = bytes.len(), "Serving promo video");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "video/mp4".to_string()),
            (CONTENT_LENGTH, bytes.len().to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
