use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An in-app notification for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    /// Username of the recipient.
    pub username: String,
    pub title: String,
    pub message: String,
    /// Kind of notification: "general", "appointment", "reminder", "message".
    #[serde(rename = "type")]
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        username: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
            title: title.into(),
            message: message.into(),
            kind: kind.into(),
            read: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notification_is_unread() {
        let n = Notification::new("amira", "Appointment confirmed", "See you Monday", "appointment");
        assert!(!n.read);
    }

    #[test]
    fn kind_serializes_as_type() {
        let n = Notification::new("amira", "t", "m", "reminder");
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "reminder");
        assert!(json.get("kind").is_none());
    }
}
