use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A self-help resource shared by a professional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    /// Body text or an external link.
    pub content: String,
    /// Free-form grouping, e.g. "stress", "sleep", "general".
    #[serde(default = "default_category")]
    pub category: String,
    /// Username of the professional who added it.
    pub added_by: String,
    pub created_at: DateTime<Utc>,
}

fn default_category() -> String {
    "general".to_string()
}

impl Resource {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        added_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            content: content.into(),
            category: category.into(),
            added_by: added_by.into(),
            created_at: Utc::now(),
        }
    }
}
