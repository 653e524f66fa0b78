//! Message classification core.
//!
//! Routes a free-text student message to a support department. Two tiers:
//! - **Rule-based** (local): word-boundary pattern matching, always available.
//! - **Bedrock** (remote): model-backed classification for nuanced messages.
//!
//! The orchestrator tries the remote tier when one is configured and falls
//! back to the rules on any remote failure. Every path ends in a sanitize
//! pass (crisis ⇒ COUNSEL, confidence clamped, reasons capped) and a
//! best-effort support-ticket write. The caller always receives a
//! well-formed result; the only surfaced error is an empty message.

pub mod bedrock;
pub mod normalize;
pub mod rules;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use mh_protocol::classify::ClassificationResult;
use mh_protocol::tickets::SupportTicket;
use mh_protocol::users::RequesterIdentity;

pub use bedrock::{BedrockClassifier, BedrockConfig};
pub use rules::{RuleClassifier, RulePatterns};

/// Remote classification tier. Fallible by design: any error here is
/// recovered locally, never surfaced to the caller.
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    /// Classify a message, or fail with one of the enumerated remote errors.
    async fn classify(&self, message: &str) -> Result<ClassificationResult, RemoteError>;

    /// Name of this tier (for logging/audit).
    fn name(&self) -> &str;
}

/// Append-only audit sink for classification outcomes.
#[async_trait]
pub trait TicketRecorder: Send + Sync {
    /// Append one audit record. Called exactly once per produced result.
    async fn record(&self, ticket: &SupportTicket) -> anyhow::Result<()>;
}

/// The narrow set of remote failures that trigger fallback. Anything the
/// remote tier cannot express here propagates as `Transport` with detail,
/// so operators still see it in the logs.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("remote classifier timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed model output: {0}")]
    Malformed(String),
}

/// The one caller-visible classification error.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("message is missing or empty")]
    EmptyMessage,
}

/// Orchestrates the two tiers and persists the outcome.
pub struct SupportClassifier {
    rules: RuleClassifier,
    remote: Option<Arc<dyn RemoteClassifier>>,
    recorder: Arc<dyn TicketRecorder>,
}

impl SupportClassifier {
    pub fn new(
        rules: RuleClassifier,
        remote: Option<Arc<dyn RemoteClassifier>>,
        recorder: Arc<dyn TicketRecorder>,
    ) -> Self {
        Self {
            rules,
            remote,
            recorder,
        }
    }

    /// Classify a message and record the outcome.
    ///
    /// Fails fast only on an empty message; every downstream failure is
    /// absorbed into the fallback path. One remote attempt per call, no
    /// retries.
    pub async fn classify(
        &self,
        requester: &RequesterIdentity,
        message: &str,
    ) -> Result<ClassificationResult, ClassifyError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ClassifyError::EmptyMessage);
        }

        let result = match &self.remote {
            Some(remote) => match remote.classify(message).await {
                Ok(result) => {
                    tracing::debug!(tier = remote.name(), "remote classification succeeded");
                    result
                }
                Err(err) => {
                    tracing::warn!(
                        tier = remote.name(),
                        error = %err,
                        "remote classification failed, falling back to rules"
                    );
                    self.rules.classify(message)
                }
            },
            None => self.rules.classify(message),
        };

        // Final invariant pass: crisis always routes to COUNSEL, confidence
        // stays in [0, 1], reasons stay capped.
        let result = result.sanitized();

        let ticket = SupportTicket::from_classification(requester, message, &result);
        if let Err(err) = self.recorder.record(&ticket).await {
            tracing::error!(error = %err, ticket_id = %ticket.id, "failed to persist support ticket");
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mh_protocol::classify::Department;
    use mh_protocol::users::Role;
    use tokio::sync::RwLock;

    /// Mock remote tier that returns a fixed result or a fixed error.
    struct MockRemote {
        result: Result<ClassificationResult, fn() -> RemoteError>,
    }

    impl MockRemote {
        fn hit(result: ClassificationResult) -> Arc<dyn RemoteClassifier> {
            Arc::new(Self { result: Ok(result) })
        }

        fn fail(err: fn() -> RemoteError) -> Arc<dyn RemoteClassifier> {
            Arc::new(Self { result: Err(err) })
        }
    }

    #[async_trait]
    impl RemoteClassifier for MockRemote {
        async fn classify(&self, _message: &str) -> Result<ClassificationResult, RemoteError> {
            match &self.result {
                Ok(result) => Ok(result.clone()),
                Err(make) => Err(make()),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    /// Recorder backed by a Vec, or one that always fails.
    struct MemoryRecorder {
        tickets: RwLock<Vec<SupportTicket>>,
        fail: bool,
    }

    impl MemoryRecorder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                tickets: RwLock::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                tickets: RwLock::new(Vec::new()),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl TicketRecorder for MemoryRecorder {
        async fn record(&self, ticket: &SupportTicket) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("disk full");
            }
            self.tickets.write().await.push(ticket.clone());
            Ok(())
        }
    }

    fn student() -> RequesterIdentity {
        RequesterIdentity::new("amira", Role::Student)
    }

    fn local_only(recorder: Arc<MemoryRecorder>) -> SupportClassifier {
        SupportClassifier::new(RuleClassifier::new(), None, recorder)
    }

    #[tokio::test]
    async fn empty_message_rejected() {
        let classifier = local_only(MemoryRecorder::new());
        let result = classifier.classify(&student(), "   \n\t ").await;
        assert!(matches!(result, Err(ClassifyError::EmptyMessage)));
    }

    #[tokio::test]
    async fn no_remote_uses_rules() {
        let recorder = MemoryRecorder::new();
        let classifier = local_only(recorder.clone());
        let result = classifier
            .classify(&student(), "I missed the exam deadline")
            .await
            .unwrap();
        assert_eq!(result.department, Department::Open);
        assert!(!result.crisis);
    }

    #[tokio::test]
    async fn remote_success_is_used() {
        let remote = MockRemote::hit(ClassificationResult {
            department: Department::Idc,
            confidence: 0.93,
            reasons: vec!["targeted harassment".into()],
            crisis: false,
        });
        let classifier =
            SupportClassifier::new(RuleClassifier::new(), Some(remote), MemoryRecorder::new());
        let result = classifier
            .classify(&student(), "people keep leaving notes on my desk")
            .await
            .unwrap();
        assert_eq!(result.department, Department::Idc);
        assert!((result.confidence - 0.93).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn remote_failure_falls_back_to_rules() {
        for make_err in [
            (|| RemoteError::Timeout(Duration::from_secs(5))) as fn() -> RemoteError,
            || RemoteError::Transport("connection refused".into()),
            || RemoteError::Malformed("expected value at line 1".into()),
        ] {
            let classifier = SupportClassifier::new(
                RuleClassifier::new(),
                Some(MockRemote::fail(make_err)),
                MemoryRecorder::new(),
            );
            let result = classifier
                .classify(&student(), "I feel so anxious lately")
                .await
                .unwrap();
            assert_eq!(result.department, Department::Counsel);
            assert!(!result.crisis);
            assert!((result.confidence - 0.85).abs() < f64::EPSILON);
        }
    }

    #[tokio::test]
    async fn fallback_is_deterministic() {
        let classifier = SupportClassifier::new(
            RuleClassifier::new(),
            Some(MockRemote::fail(|| {
                RemoteError::Transport("quota exceeded".into())
            })),
            MemoryRecorder::new(),
        );
        let first = classifier
            .classify(&student(), "my grades are slipping")
            .await
            .unwrap();
        let second = classifier
            .classify(&student(), "my grades are slipping")
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn crisis_invariant_overrides_remote_department() {
        // A remote tier that claims crisis but routes elsewhere is corrected.
        let remote = MockRemote::hit(ClassificationResult {
            department: Department::Open,
            confidence: 0.7,
            reasons: vec![],
            crisis: true,
        });
        let classifier =
            SupportClassifier::new(RuleClassifier::new(), Some(remote), MemoryRecorder::new());
        let result = classifier.classify(&student(), "anything").await.unwrap();
        assert_eq!(result.department, Department::Counsel);
        assert!(result.crisis);
    }

    #[tokio::test]
    async fn out_of_range_remote_confidence_clamped() {
        let remote = MockRemote::hit(ClassificationResult {
            department: Department::Open,
            confidence: 17.0,
            reasons: vec![],
            crisis: false,
        });
        let classifier =
            SupportClassifier::new(RuleClassifier::new(), Some(remote), MemoryRecorder::new());
        let result = classifier.classify(&student(), "hello").await.unwrap();
        assert_eq!(result.confidence, 1.0);
    }

    #[tokio::test]
    async fn ticket_recorded_once_per_call() {
        let recorder = MemoryRecorder::new();
        let classifier = local_only(recorder.clone());
        classifier
            .classify(&student(), "I want to end my life")
            .await
            .unwrap();

        let tickets = recorder.tickets.read().await;
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].username, "amira");
        assert_eq!(tickets[0].department, Department::Counsel);
        assert!(tickets[0].crisis);
    }

    #[tokio::test]
    async fn recorder_failure_does_not_affect_result() {
        let classifier = local_only(MemoryRecorder::failing());
        let result = classifier
            .classify(&student(), "I feel hopeless")
            .await
            .unwrap();
        assert_eq!(result.department, Department::Counsel);
    }
}
