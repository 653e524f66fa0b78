use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::{ClassificationResult, Department};
use crate::users::RequesterIdentity;

/// Persisted audit record of a classification outcome (or a manually filed
/// ticket). Append-only: this subsystem never updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportTicket {
    /// Unique ticket ID (UUIDv7 for time-sortability).
    pub id: Uuid,
    /// Username of the requester.
    pub username: String,
    /// Optional subject line (manual tickets only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Original message text as submitted.
    pub message: String,
    /// Department the message was routed to.
    pub department: Department,
    /// Classifier confidence; absent on manually filed tickets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Whether crisis language was detected.
    pub crisis: bool,
    /// Lifecycle status.
    pub status: TicketStatus,
    /// When the ticket was created.
    pub created_at: DateTime<Utc>,
}

/// Lifecycle status of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(TicketStatus::Open),
            "resolved" => Some(TicketStatus::Resolved),
            _ => None,
        }
    }
}

impl SupportTicket {
    /// Build the audit record for a classification call.
    pub fn from_classification(
        requester: &RequesterIdentity,
        message: impl Into<String>,
        result: &ClassificationResult,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: requester.username.clone(),
            subject: None,
            message: message.into(),
            department: result.department,
            confidence: Some(result.confidence),
            crisis: result.crisis,
            status: TicketStatus::Open,
            created_at: Utc::now(),
        }
    }

    /// Build a manually filed ticket (no classifier involved).
    pub fn manual(
        requester: &RequesterIdentity,
        subject: impl Into<String>,
        message: impl Into<String>,
        department: Department,
        crisis: bool,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: requester.username.clone(),
            subject: Some(subject.into()),
            message: message.into(),
            department,
            confidence: None,
            crisis,
            status: TicketStatus::Open,
            created_at: Utc::now(),
        }
    }
}
