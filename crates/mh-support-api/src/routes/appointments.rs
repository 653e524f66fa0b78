//! Appointment endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use mh_protocol::appointments::Appointment;
use mh_protocol::notifications::Notification;
use mh_protocol::users::Role;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub professional_username: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub reason: String,
}

/// POST /api/v1/appointments — students book a session with a professional.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
    Json(request): Json<CreateAppointmentRequest>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    if requester.role != Role::Student {
        return Err(ApiError::Forbidden(
            "only students can book appointments".into(),
        ));
    }
    if request.professional_username.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "missing 'professional_username' in request body".into(),
        ));
    }

    let appointment = Appointment::new(
        &requester.username,
        &request.professional_username,
        request.date,
        request.time,
        request.reason,
    );
    state.appointments.insert(&appointment).await?;

    // Best effort: the booking stands even if the notification write fails.
    let notification = Notification::new(
        &appointment.professional_username,
        "New appointment request",
        format!(
            "{} requested a session on {} at {}",
            appointment.student_username, appointment.date, appointment.time
        ),
        "appointment",
    );
    if let Err(err) = state.notifications.insert(&notification).await {
        tracing::warn!(error = %err, "failed to notify professional of new appointment");
    }

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// GET /api/v1/appointments — the caller's appointments.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
) -> ApiResult<Json<Vec<Appointment>>> {
    let appointments = state.appointments.list_for(&requester).await?;
    Ok(Json(appointments))
}
