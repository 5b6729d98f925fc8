use crate::config::config::AppConfig;
use crate::engine::DialogueEngine;
use crate::error::Result;
use crate::extraction::ExtractorRegistry;
use crate::observability::{AppMetrics, HealthCheckResult, ObservabilityState};
use crate::services::{
    AccountService, ChatService, ReportService, create_account_service, create_chat_service,
    create_report_service,
};
use crate::storage::{InMemoryAccountStore, InMemoryConversationStore};
use crate::upstream::{CompletionClient, DisabledClient, HttpCompletionClient};
use std::sync::Arc;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Loaded application configuration
    pub config: Arc<AppConfig>,
    /// Account service for registration, login and token checks
    pub account_service: Arc<dyn AccountService>,
    /// Chat service for the symptom dialogue
    pub chat_service: Arc<dyn ChatService>,
    /// Report service for uploaded medical reports
    pub report_service: Arc<dyn ReportService>,
    /// Metrics and health checks
    pub observability: Arc<ObservabilityState>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("app_name", &self.config.app_name)
            .field("account_service", &"Arc<dyn AccountService>")
            .field("chat_service", &"Arc<dyn ChatService>")
            .field("report_service", &"Arc<dyn ReportService>")
            .field("version", &self.observability.version)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: AppConfig,
        account_service: Box<dyn AccountService>,
        chat_service: Box<dyn ChatService>,
        report_service: Box<dyn ReportService>,
        observability: ObservabilityState,
    ) -> Self {
        Self {
            config: Arc::new(config),
            account_service: Arc::from(account_service),
            chat_service: Arc::from(chat_service),
            report_service: Arc::from(report_service),
            observability: Arc::new(observability),
        }
    }

    /// Wire in-memory stores, the completion client and all services from configuration
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let client: Arc<dyn CompletionClient> = if config.completion.any_enabled() {
            Arc::new(HttpCompletionClient::new(&config.completion)?)
        } else {
            Arc::new(DisabledClient)
        };

        let account_service = create_account_service(
            Arc::new(InMemoryAccountStore::new()),
            &config.auth.seed_users,
        )
        .await?;

        let chat_service = create_chat_service(
            DialogueEngine::new(config.dialogue.clone()),
            Arc::new(InMemoryConversationStore::new()),
            client.clone(),
            config.completion.chat_enabled,
        );

        let report_service = create_report_service(
            ExtractorRegistry::default(),
            client,
            config.completion.report_enabled,
        );

        let observability = ObservabilityState::new(
            env!("CARGO_PKG_VERSION").to_string(),
            Arc::new(AppMetrics::default()),
        );
        let completion_message = if config.completion.any_enabled() {
            format!("configured: {}", config.completion.base_url)
        } else {
            "disabled, rule engine only".to_string()
        };
        observability
            .add_health_check(HealthCheckResult {
                name: "completion_service".to_string(),
                healthy: true,
                message: completion_message,
            })
            .await;

        Ok(Self::new(
            config,
            account_service,
            chat_service,
            report_service,
            observability,
        ))
    }

    pub fn metrics(&self) -> &AppMetrics {
        &self.observability.metrics
    }
}
