//! API route definitions and router builder.

pub mod appointments;
pub mod classify;
pub mod feedback;
pub mod health;
pub mod notifications;
pub mod resources;
pub mod tickets;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Classification
        .route("/classify", post(classify::classify))
        // Support tickets
        .route("/tickets", get(tickets::list).post(tickets::create))
        // Appointments
        .route(
            "/appointments",
            get(appointments::list).post(appointments::create),
        )
        // Self-help resources
        .route("/resources", get(resources::list).post(resources::create))
        // Notifications
        .route("/notifications", get(notifications::list))
        .route("/notifications/{id}/read", put(notifications::mark_read))
        // Feedback
        .route("/feedback", get(feedback::list).post(feedback::create));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
