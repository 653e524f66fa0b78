use serde::{Deserialize, Serialize};

/// Account role on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A student seeking support.
    Student,
    /// A mental-health or academic professional.
    Professional,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professional => "professional",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Role::Student),
            "professional" => Some(Role::Professional),
            _ => None,
        }
    }
}

/// Identity attached to a request by the authentication layer.
///
/// The classification core never authenticates; it only receives this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequesterIdentity {
    pub username: String,
    pub role: Role,
}

impl RequesterIdentity {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serialization() {
        assert_eq!(
            serde_json::to_string(&Role::Student).unwrap(),
            r#""student""#
        );
        assert_eq!(
            serde_json::to_string(&Role::Professional).unwrap(),
            r#""professional""#
        );
    }

    #[test]
    fn role_parse() {
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("admin"), None);
    }
}
