//! Storage layer.
//!
//! Each store writes through to PostgreSQL when a pool is configured and
//! falls back to in-memory vectors otherwise (tests and development), the
//! same shape for both modes.

pub mod appointments;
pub mod feedback;
pub mod notifications;
pub mod resources;
pub mod tickets;

pub use appointments::AppointmentStore;
pub use feedback::FeedbackStore;
pub use notifications::NotificationStore;
pub use resources::ResourceStore;
pub use tickets::TicketStore;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connect to PostgreSQL and run migrations.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    tracing::info!("running database migrations");
    sqlx::raw_sql(include_str!("../../migrations/001_support_tickets.sql"))
        .execute(&pool)
        .await?;
    sqlx::raw_sql(include_str!("../../migrations/002_appointments.sql"))
        .execute(&pool)
        .await?;
    sqlx::raw_sql(include_str!("../../migrations/003_resources.sql"))
        .execute(&pool)
        .await?;
    sqlx::raw_sql(include_str!("../../migrations/004_notifications.sql"))
        .execute(&pool)
        .await?;
    sqlx::raw_sql(include_str!("../../migrations/005_feedback.sql"))
        .execute(&pool)
        .await?;
    tracing::info!("migrations complete");

    Ok(pool)
}
