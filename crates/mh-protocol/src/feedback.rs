use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::Role;

/// Platform feedback left by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    /// Star rating, 1 through 5.
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(
        username: impl Into<String>,
        role: Role,
        rating: u8,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
            role,
            rating,
            comment: comment.into(),
            created_at: Utc::now(),
        }
    }
}
