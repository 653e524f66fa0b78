//! Support ticket endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use mh_protocol::classify::Department;
use mh_protocol::tickets::SupportTicket;
use mh_protocol::users::Role;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const LIST_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    /// Optional explicit department; defaults to OPEN.
    pub department: Option<String>,
    #[serde(default)]
    pub crisis: bool,
}

/// POST /api/v1/tickets — file a ticket directly, bypassing the classifier.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
    Json(request): Json<CreateTicketRequest>,
) -> ApiResult<(StatusCode, Json<SupportTicket>)> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "missing 'message' in request body".into(),
        ));
    }

    let department = request
        .department
        .as_deref()
        .and_then(Department::parse)
        .unwrap_or_default();

    let ticket = SupportTicket::manual(
        &requester,
        request.subject,
        request.message,
        department,
        request.crisis,
    );
    state.tickets.insert(&ticket).await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/v1/tickets — recent tickets, professionals only.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
) -> ApiResult<Json<Vec<SupportTicket>>> {
    if requester.role != Role::Professional {
        return Err(ApiError::Forbidden("professional access required".into()));
    }
    let tickets = state.tickets.recent(LIST_LIMIT).await?;
    Ok(Json(tickets))
}
