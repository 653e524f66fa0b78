//! Platform feedback endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use mh_protocol::feedback::Feedback;
use mh_protocol::users::Role;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

/// POST /api/v1/feedback — any authenticated user leaves a rating.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
    Json(request): Json<CreateFeedbackRequest>,
) -> ApiResult<(StatusCode, Json<Feedback>)> {
    if !(1..=5).contains(&request.rating) {
        return Err(ApiError::BadRequest(
            "rating must be between 1 and 5".into(),
        ));
    }

    let feedback = Feedback::new(
        &requester.username,
        requester.role,
        request.rating as u8,
        request.comment,
    );
    state.feedback.insert(&feedback).await?;

    Ok((StatusCode::CREATED, Json(feedback)))
}

/// GET /api/v1/feedback — professionals review submitted feedback.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
) -> ApiResult<Json<Vec<Feedback>>> {
    if requester.role != Role::Professional {
        return Err(ApiError::Forbidden("professional access required".into()));
    }
    let feedback = state.feedback.list_all().await?;
    Ok(Json(feedback))
}
