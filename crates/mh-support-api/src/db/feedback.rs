//! Platform feedback persistence.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use mh_protocol::feedback::Feedback;
use mh_protocol::users::Role;

pub struct FeedbackStore {
    pool: Option<PgPool>,
    memory: RwLock<Vec<Feedback>>,
}

#[derive(sqlx::FromRow)]
struct FeedbackRow {
    id: Uuid,
    username: String,
    role: String,
    rating: i16,
    comment: String,
    created_at: DateTime<Utc>,
}

impl From<FeedbackRow> for Feedback {
    fn from(row: FeedbackRow) -> Self {
        Feedback {
            id: row.id,
            username: row.username,
            role: Role::parse(&row.role).unwrap_or(Role::Student),
            rating: row.rating.clamp(1, 5) as u8,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

impl FeedbackStore {
    pub fn in_memory() -> Self {
        Self { pool: None, memory: RwLock::new(Vec::new()) }
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool: Some(pool), memory: RwLock::new(Vec::new()) }
    }

    pub async fn insert(&self, feedback: &Feedback) -> anyhow::Result<()> {
        match &self.pool {
            Some(pool) => {
                sqlx::query(
                    "INSERT INTO feedback (id, username, role, rating, comment, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6)",
                )
                .bind(feedback.id)
                .bind(&feedback.username)
                .bind(feedback.role.as_str())
                .bind(feedback.rating as i16)
                .bind(&feedback.comment)
                .bind(feedback.created_at)
                .execute(pool)
                .await?;
            }
            None => {
                self.memory.write().await.push(feedback.clone());
            }
        }
        Ok(())
    }

    /// All feedback, newest first.
    pub async fn list_all(&self) -> anyhow::Result<Vec<Feedback>> {
        match &self.pool {
            Some(pool) => {
                let rows: Vec<FeedbackRow> = sqlx::query_as(
                    "SELECT id, username, role, rating, comment, created_at \
                     FROM feedback ORDER BY created_at DESC",
                )
                .fetch_all(pool)
                .await?;
                Ok(rows.into_iter().map(Feedback::from).collect())
            }
            None => {
                let guard = self.memory.read().await;
                let mut entries: Vec<Feedback> = guard.clone();
                entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(entries)
            }
        }
    }
}
