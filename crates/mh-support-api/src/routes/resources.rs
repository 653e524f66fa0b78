//! Self-help resource endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use mh_protocol::resources::Resource;
use mh_protocol::users::Role;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateResourceRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "general".to_string()
}

/// GET /api/v1/resources — public, no authentication required.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Resource>>> {
    let resources = state.resources.list_all().await?;
    Ok(Json(resources))
}

/// POST /api/v1/resources — professionals publish resources.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
    Json(request): Json<CreateResourceRequest>,
) -> ApiResult<(StatusCode, Json<Resource>)> {
    if requester.role != Role::Professional {
        return Err(ApiError::Forbidden("professional access required".into()));
    }
    if request.title.trim().is_empty() || request.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "both 'title' and 'content' are required".into(),
        ));
    }

    let resource = Resource::new(
        request.title,
        request.content,
        request.category,
        &requester.username,
    );
    state.resources.insert(&resource).await?;

    Ok((StatusCode::CREATED, Json(resource)))
}
