//! AWS Bedrock remote classifier — Converse API tier.
//!
//! Submits the raw message with a fixed taxonomy prompt and parses the
//! constrained JSON reply. Output is never trusted as-is: it goes through
//! `RawClassification::coerce` before anything downstream sees it. Any
//! transport error, timeout, or unparseable reply surfaces as a
//! `RemoteError` and the orchestrator falls back to the rule tier.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use tokio::time::timeout;

use super::{RemoteClassifier, RemoteError};
use mh_protocol::classify::{ClassificationResult, RawClassification};

/// Fixed instruction prompt defining the four-category taxonomy and the
/// constrained JSON response shape.
const SYSTEM_PROMPT: &str = r#"You are the Student Support Classifier for a university mental-health platform. Analyze the student's message and classify it into exactly one route:

- IDC = discrimination, harassment, racist comments, bullying targeting identity
- OPEN = academic issues, courses, teachers, grades
- COUNSEL = emotional struggles, loneliness, stress, anxiety, depression
- CRISIS = self-harm, suicide, or immediate danger

Respond with ONLY a JSON object (no markdown, no explanation):
{"department": "IDC" | "OPEN" | "COUNSEL", "confidence": <0.0-1.0>, "reasons": ["short bullets"], "crisis": true | false}

Rules:
- Crisis overrides everything: set department to "COUNSEL" and crisis to true.
- Keep reasons to at most 6 short strings."#;

/// Near-deterministic generation; classification must not drift run to run.
const TEMPERATURE: f32 = 0.1;

/// Configuration for the Bedrock classifier tier.
#[derive(Debug, Clone)]
pub struct BedrockConfig {
    /// Bedrock model ID (e.g., "us.amazon.nova-lite-v1:0").
    pub model_id: String,
    /// Per-request timeout; a hang is a failure, not a wait.
    pub timeout: Duration,
}

impl BedrockConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let model_id =
            std::env::var("BEDROCK_MODEL_ID").unwrap_or_else(|_| "us.amazon.nova-lite-v1:0".into());
        let timeout_secs: u64 = std::env::var("BEDROCK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        Self {
            model_id,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Bedrock Converse API classifier.
pub struct BedrockClassifier {
    client: BedrockClient,
    config: BedrockConfig,
}

impl BedrockClassifier {
    /// Create a new classifier with a pre-built Bedrock client.
    pub fn new(client: BedrockClient, config: BedrockConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl RemoteClassifier for BedrockClassifier {
    async fn classify(&self, message: &str) -> Result<ClassificationResult, RemoteError> {
        match timeout(self.config.timeout, self.call_converse(message)).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout(self.config.timeout)),
        }
    }

    fn name(&self) -> &str {
        "bedrock"
    }
}

impl BedrockClassifier {
    /// Call the Bedrock Converse API and coerce the response.
    async fn call_converse(&self, message: &str) -> Result<ClassificationResult, RemoteError> {
        let user_message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(message.to_string()))
            .build()
            .map_err(|e| RemoteError::Transport(format!("failed to build message: {e}")))?;

        let response = self
            .client
            .converse()
            .model_id(&self.config.model_id)
            .system(SystemContentBlock::Text(SYSTEM_PROMPT.to_string()))
            .messages(user_message)
            .inference_config(
                InferenceConfiguration::builder()
                    .temperature(TEMPERATURE)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| RemoteError::Transport(format!("bedrock converse error: {e}")))?;

        let output = response
            .output()
            .ok_or_else(|| RemoteError::Malformed("no output in bedrock response".into()))?;

        let text_content = match output {
            aws_sdk_bedrockruntime::types::ConverseOutput::Message(msg) => {
                msg.content().iter().find_map(|block| {
                    if let ContentBlock::Text(t) = block {
                        Some(t.clone())
                    } else {
                        None
                    }
                })
            }
            _ => None,
        };

        let Some(raw_text) = text_content else {
            return Err(RemoteError::Malformed(
                "no text content in bedrock response".into(),
            ));
        };

        let json_str = extract_json(&raw_text);
        let raw: RawClassification = serde_json::from_str(json_str).map_err(|e| {
            RemoteError::Malformed(format!("invalid JSON from model: {e} — raw: {raw_text}"))
        })?;

        Ok(raw.coerce())
    }
}

/// Extract JSON from model output that may be wrapped in markdown code blocks.
fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    // Try ```json ... ``` first
    if let Some(start) = trimmed.find("```json") {
        let after_fence = &trimmed[start + 7..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    // Try ``` ... ```
    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    // Assume raw JSON
    trimmed
}
