//! Notification endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use mh_protocol::notifications::Notification;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/v1/notifications — the caller's notifications, newest first.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = state.notifications.list_for(&requester.username).await?;
    Ok(Json(notifications))
}

/// PUT /api/v1/notifications/{id}/read — mark one of the caller's
/// notifications as read.
pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let updated = state.notifications.mark_read(id, &requester.username).await?;
    if !updated {
        return Err(ApiError::NotFound(format!("notification {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
