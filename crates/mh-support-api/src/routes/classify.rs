//! Message classification endpoint.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use mh_protocol::classify::ClassificationResult;
use mh_protocol::users::Role;

use crate::auth::AuthUser;
use crate::classify::ClassifyError;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub message: String,
}

/// POST /api/v1/classify
///
/// Students submit a free-text message and receive a routing decision.
/// A support ticket is recorded for every successful classification.
pub async fn classify(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
    Json(request): Json<ClassifyRequest>,
) -> ApiResult<Json<ClassificationResult>> {
    if requester.role != Role::Student {
        return Err(ApiError::Forbidden(
            "only students can use the classifier".into(),
        ));
    }

    let result = state
        .classifier
        .classify(&requester, &request.message)
        .await
        .map_err(|err| match err {
            ClassifyError::EmptyMessage => {
                ApiError::BadRequest("missing 'message' in request body".into())
            }
        })?;

    Ok(Json(result))
}
