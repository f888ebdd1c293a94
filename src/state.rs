//! Application State
//!
//! Services built once at startup and shared by `Arc`.

use std::sync::Arc;

use tracing::warn;

use career_compass_llm::{GeminiProvider, LlmProvider};

use crate::models::settings::AppConfig;
use crate::services::gateway::{GatewayOptions, RecommendationGateway};
use crate::services::quiz::QuizFlow;

/// Application state shared by every entry point
pub struct AppState {
    config: AppConfig,
    gateway: Arc<RecommendationGateway>,
    flow: Arc<QuizFlow>,
}

impl AppState {
    /// Build the services from an already-validated configuration.
    ///
    /// A missing API key, or a client that cannot be built, leaves the
    /// gateway in fallback-only mode.
    pub fn from_config(config: AppConfig) -> Self {
        let options = GatewayOptions {
            request_timeout: config.request_timeout(),
            max_attempts: config.max_attempts,
        };
        let gateway = Arc::new(RecommendationGateway::new(
            Self::build_provider(&config),
            options,
        ));
        Self::with_gateway(config, gateway)
    }

    /// Use a caller-supplied gateway
    pub fn with_gateway(config: AppConfig, gateway: Arc<RecommendationGateway>) -> Self {
        let flow = Arc::new(QuizFlow::new(gateway.clone()));
        Self {
            config,
            gateway,
            flow,
        }
    }

    fn build_provider(config: &AppConfig) -> Option<Arc<dyn LlmProvider>> {
        if !config.has_api_key() {
            return None;
        }
        match GeminiProvider::new(config.provider_config(), config.request_timeout()) {
            Ok(provider) => Some(Arc::new(provider) as Arc<dyn LlmProvider>),
            Err(e) => {
                warn!(error = %e, "could not create the Gemini client");
                None
            }
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn gateway(&self) -> Arc<RecommendationGateway> {
        self.gateway.clone()
    }

    pub fn flow(&self) -> Arc<QuizFlow> {
        self.flow.clone()
    }
}
