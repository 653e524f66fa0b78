//! Self-help resource persistence.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use mh_protocol::resources::Resource;

pub struct ResourceStore {
    pool: Option<PgPool>,
    memory: RwLock<Vec<Resource>>,
}

#[derive(sqlx::FromRow)]
struct ResourceRow {
    id: Uuid,
    title: String,
    content: String,
    category: String,
    added_by: String,
    created_at: DateTime<Utc>,
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        Resource {
            id: row.id,
            title: row.title,
            content: row.content,
            category: row.category,
            added_by: row.added_by,
            created_at: row.created_at,
        }
    }
}

impl ResourceStore {
    pub fn in_memory() -> Self {
        Self { pool: None, memory: RwLock::new(Vec::new()) }
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool: Some(pool), memory: RwLock::new(Vec::new()) }
    }

    pub async fn insert(&self, resource: &Resource) -> anyhow::Result<()> {
        match &self.pool {
            Some(pool) => {
                sqlx::query(
                    "INSERT INTO resources (id, title, content, category, added_by, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6)",
                )
                .bind(resource.id)
                .bind(&resource.title)
                .bind(&resource.content)
                .bind(&resource.category)
                .bind(&resource.added_by)
                .bind(resource.created_at)
                .execute(pool)
                .await?;
            }
            None => {
                self.memory.write().await.push(resource.clone());
            }
        }
        Ok(())
    }

    /// All resources, newest first.
    pub async fn list_all(&self) -> anyhow::Result<Vec<Resource>> {
        match &self.pool {
            Some(pool) => {
                let rows: Vec<ResourceRow> = sqlx::query_as(
                    "SELECT id, title, content, category, added_by, created_at \
                     FROM resources ORDER BY created_at DESC",
                )
                .fetch_all(pool)
                .await?;
                Ok(rows.into_iter().map(Resource::from).collect())
            }
            None => {
                let guard = self.memory.read().await;
                let mut resources: Vec<Resource> = guard.clone();
                resources.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(resources)
            }
        }
    }
}
