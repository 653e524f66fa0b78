//! API server configuration.
//!
//! Loaded once at process start and passed into the pieces that need it;
//! nothing reads ambient environment state after startup.

use serde::Deserialize;

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins (e.g., ["http://localhost:5173"]).
    #[serde(default)]
    #[allow(dead_code)]
    pub cors_origins: Vec<String>,
    /// Enable the Bedrock remote classifier tier (BEDROCK_ENABLED env var).
    #[serde(default)]
    pub bedrock_enabled: bool,
    /// HS256 secret for JWT verification (JWT_SECRET env var).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_jwt_secret() -> String {
    "dev-secret-change-me".to_string()
}

impl ApiConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Self {
        let bedrock_enabled = std::env::var("BEDROCK_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| default_jwt_secret());
        Self {
            bedrock_enabled,
            jwt_secret,
            ..Self::default()
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            bedrock_enabled: false,
            jwt_secret: default_jwt_secret(),
        }
    }
}
