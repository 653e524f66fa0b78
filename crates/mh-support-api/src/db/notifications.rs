//! Notification persistence.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use mh_protocol::notifications::Notification;

pub struct NotificationStore {
    pool: Option<PgPool>,
    memory: RwLock<Vec<Notification>>,
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    username: String,
    title: String,
    message: String,
    kind: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            id: row.id,
            username: row.username,
            title: row.title,
            message: row.message,
            kind: row.kind,
            read: row.read,
            created_at: row.created_at,
        }
    }
}

impl NotificationStore {
    pub fn in_memory() -> Self {
        Self { pool: None, memory: RwLock::new(Vec::new()) }
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool: Some(pool), memory: RwLock::new(Vec::new()) }
    }

    pub async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        match &self.pool {
            Some(pool) => {
                sqlx::query(
                    "INSERT INTO notifications (id, username, title, message, kind, read, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7)",
                )
                .bind(notification.id)
                .bind(&notification.username)
                .bind(&notification.title)
                .bind(&notification.message)
                .bind(&notification.kind)
                .bind(notification.read)
                .bind(notification.created_at)
                .execute(pool)
                .await?;
            }
            None => {
                self.memory.write().await.push(notification.clone());
            }
        }
        Ok(())
    }

    /// Notifications for one user, newest first.
    pub async fn list_for(&self, username: &str) -> anyhow::Result<Vec<Notification>> {
        match &self.pool {
            Some(pool) => {
                let rows: Vec<NotificationRow> = sqlx::query_as(
                    "SELECT id, username, title, message, kind, read, created_at \
                     FROM notifications WHERE username = $1 ORDER BY created_at DESC",
                )
                .bind(username)
                .fetch_all(pool)
                .await?;
                Ok(rows.into_iter().map(Notification::from).collect())
            }
            None => {
                let guard = self.memory.read().await;
                let mut notifications: Vec<Notification> = guard
                    .iter()
                    .filter(|n| n.username == username)
                    .cloned()
                    .collect();
                notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(notifications)
            }
        }
    }

    /// Mark one notification as read if it belongs to `username`.
    /// Returns false when no such notification exists.
    pub async fn mark_read(&self, id: Uuid, username: &str) -> anyhow::Result<bool> {
        match &self.pool {
            Some(pool) => {
                let result = sqlx::query(
                    "UPDATE notifications SET read = TRUE WHERE id = $1 AND username = $2",
                )
                .bind(id)
                .bind(username)
                .execute(pool)
                .await?;
                Ok(result.rows_affected() > 0)
            }
            None => {
                let mut guard = self.memory.write().await;
                match guard.iter_mut().find(|n| n.id == id && n.username == username) {
                    Some(n) => {
                        n.read = true;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
        }
    }
}
