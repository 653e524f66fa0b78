//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::AuthKeys;
use crate::classify::{RemoteClassifier, RuleClassifier, SupportClassifier};
use crate::db::{AppointmentStore, FeedbackStore, NotificationStore, ResourceStore, TicketStore};

/// Everything the route handlers share. Cheap to clone (all `Arc`s).
#[derive(Clone)]
pub struct AppState {
    pub tickets: Arc<TicketStore>,
    pub appointments: Arc<AppointmentStore>,
    pub resources: Arc<ResourceStore>,
    pub notifications: Arc<NotificationStore>,
    pub feedback: Arc<FeedbackStore>,
    pub classifier: Arc<SupportClassifier>,
    pub auth: Arc<AuthKeys>,
}

impl AppState {
    /// In-memory state (no database). Used in development and tests.
    pub fn new() -> Self {
        Self::build(
            TicketStore::in_memory(),
            AppointmentStore::in_memory(),
            ResourceStore::in_memory(),
            NotificationStore::in_memory(),
            FeedbackStore::in_memory(),
        )
    }

    /// State backed by PostgreSQL.
    pub fn with_pool(pool: PgPool) -> Self {
        Self::build(
            TicketStore::with_pool(pool.clone()),
            AppointmentStore::with_pool(pool.clone()),
            ResourceStore::with_pool(pool.clone()),
            NotificationStore::with_pool(pool.clone()),
            FeedbackStore::with_pool(pool),
        )
    }

    fn build(
        tickets: TicketStore,
        appointments: AppointmentStore,
        resources: ResourceStore,
        notifications: NotificationStore,
        feedback: FeedbackStore,
    ) -> Self {
        let tickets = Arc::new(tickets);
        let classifier = Arc::new(SupportClassifier::new(
            RuleClassifier::new(),
            None,
            tickets.clone(),
        ));
        Self {
            tickets,
            appointments: Arc::new(appointments),
            resources: Arc::new(resources),
            notifications: Arc::new(notifications),
            feedback: Arc::new(feedback),
            classifier,
            auth: Arc::new(AuthKeys::from_secret("dev-secret-change-me")),
        }
    }

    /// Replace the token verification keys.
    pub fn with_jwt_secret(mut self, secret: &str) -> Self {
        self.auth = Arc::new(AuthKeys::from_secret(secret));
        self
    }

    /// Attach a remote classification tier. Rebuilds the classifier so the
    /// orchestrator picks it up.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteClassifier>) -> Self {
        self.classifier = Arc::new(SupportClassifier::new(
            RuleClassifier::new(),
            Some(remote),
            self.tickets.clone(),
        ));
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
