//! Support ticket persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use mh_protocol::classify::Department;
use mh_protocol::tickets::{SupportTicket, TicketStatus};

use crate::classify::TicketRecorder;

/// Append-only store for support tickets.
pub struct TicketStore {
    pool: Option<PgPool>,
    memory: RwLock<Vec<SupportTicket>>,
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    username: String,
    subject: Option<String>,
    message: String,
    department: String,
    confidence: Option<f64>,
    crisis: bool,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<TicketRow> for SupportTicket {
    fn from(row: TicketRow) -> Self {
        SupportTicket {
            id: row.id,
            username: row.username,
            subject: row.subject,
            message: row.message,
            department: Department::parse(&row.department).unwrap_or_default(),
            confidence: row.confidence,
            crisis: row.crisis,
            status: TicketStatus::parse(&row.status).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

impl TicketStore {
    pub fn in_memory() -> Self {
        Self { pool: None, memory: RwLock::new(Vec::new()) }
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool: Some(pool), memory: RwLock::new(Vec::new()) }
    }

    pub async fn insert(&self, ticket: &SupportTicket) -> anyhow::Result<()> {
        match &self.pool {
            Some(pool) => {
                sqlx::query(
                    "INSERT INTO support_tickets \
                     (id, username, subject, message, department, confidence, crisis, status, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                )
                .bind(ticket.id)
                .bind(&ticket.username)
                .bind(&ticket.subject)
                .bind(&ticket.message)
                .bind(ticket.department.as_str())
                .bind(ticket.confidence)
                .bind(ticket.crisis)
                .bind(ticket.status.as_str())
                .bind(ticket.created_at)
                .execute(pool)
                .await?;
            }
            None => {
                self.memory.write().await.push(ticket.clone());
            }
        }
        Ok(())
    }

    /// Most recent tickets first.
    pub async fn recent(&self, limit: i64) -> anyhow::Result<Vec<SupportTicket>> {
        match &self.pool {
            Some(pool) => {
                let rows: Vec<TicketRow> = sqlx::query_as(
                    "SELECT id, username, subject, message, department, confidence, crisis, status, created_at \
                     FROM support_tickets ORDER BY created_at DESC LIMIT $1",
                )
                .bind(limit)
                .fetch_all(pool)
                .await?;
                Ok(rows.into_iter().map(SupportTicket::from).collect())
            }
            None => {
                let guard = self.memory.read().await;
                let mut tickets: Vec<SupportTicket> = guard.clone();
                tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                tickets.truncate(limit as usize);
                Ok(tickets)
            }
        }
    }
}

#[async_trait]
impl TicketRecorder for TicketStore {
    async fn record(&self, ticket: &SupportTicket) -> anyhow::Result<()> {
        self.insert(ticket).await
    }
}
