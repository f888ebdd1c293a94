//! Recommendation Gateway
//!
//! Produces questions, recommendations and companion lines from the remote
//! text-generation service. Public operations never fail: any transport or
//! format problem is logged and replaced with built-in content.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use career_compass_core::{Answer, CareerRecommendation, Question};
use career_compass_llm::{
    LlmError, LlmProvider, LlmRequestOptions, LlmResult, Message, DEFAULT_REQUEST_TIMEOUT,
};

use super::{fallback, parsing, prompts};
use crate::models::companion::MessageContext;

/// Timeout and retry settings for remote calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayOptions {
    /// Upper bound on a single attempt
    pub request_timeout: Duration,
    /// Transport attempts before falling back (1 = no retry)
    pub max_attempts: u32,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_attempts: 1,
        }
    }
}

/// Why a remote call was abandoned in favor of built-in content
#[derive(Debug, Error)]
enum GatewayFailure {
    /// The call could not complete
    #[error("transport failure: {0}")]
    Transport(LlmError),
    /// The call completed but the content was unusable
    #[error("format failure: {0}")]
    Format(String),
}

/// Errors worth another attempt. Credential and request errors are not.
fn is_retryable(error: &LlmError) -> bool {
    matches!(
        error,
        LlmError::RateLimited { .. }
            | LlmError::ServerError { .. }
            | LlmError::NetworkError { .. }
            | LlmError::Timeout { .. }
    )
}

/// Content service backed by an optional text-generation provider.
///
/// Constructed once and shared by `Arc`; holds no per-quiz state.
pub struct RecommendationGateway {
    provider: Option<Arc<dyn LlmProvider>>,
    options: GatewayOptions,
}

impl RecommendationGateway {
    /// Create a gateway. `None` puts it in fallback-only mode.
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, options: GatewayOptions) -> Self {
        match &provider {
            Some(p) => info!(
                provider = p.name(),
                model = p.model(),
                timeout_secs = options.request_timeout.as_secs(),
                max_attempts = options.max_attempts,
                "recommendation gateway ready"
            ),
            None => warn!(
                "no API credential configured; serving built-in questions and recommendations only"
            ),
        }
        Self { provider, options }
    }

    /// Gateway that never calls out
    pub fn fallback_only() -> Self {
        Self::new(None, GatewayOptions::default())
    }

    pub fn is_fallback_only(&self) -> bool {
        self.provider.is_none()
    }

    pub fn options(&self) -> GatewayOptions {
        self.options
    }

    /// Generate `count` questions, shaped by any answers given so far.
    ///
    /// Falls back to the built-in questions truncated to `count`.
    pub async fn generate_questions(&self, prior_answers: &[Answer], count: usize) -> Vec<Question> {
        let count = if count == 0 {
            warn!("question count of 0 requested, generating 1");
            1
        } else {
            count
        };

        let prompt = prompts::build_questions_prompt(prior_answers, count);
        let result = match self.complete("generate_questions", prompt).await {
            Ok(text) => parsing::parse_questions(&text, count).map_err(GatewayFailure::Format),
            Err(e) => Err(e),
        };

        match result {
            Ok(questions) => {
                debug!(count = questions.len(), "questions generated");
                questions
            }
            Err(e) => {
                warn!(operation = "generate_questions", error = %e, "using built-in questions");
                fallback::questions(count)
            }
        }
    }

    /// Recommend 3-5 careers for the given answers.
    ///
    /// Falls back to the two built-in recommendations.
    pub async fn generate_recommendations(&self, answers: &[Answer]) -> Vec<CareerRecommendation> {
        let prompt = prompts::build_recommendations_prompt(answers);
        let result = match self.complete("generate_recommendations", prompt).await {
            Ok(text) => parsing::parse_recommendations(&text).map_err(GatewayFailure::Format),
            Err(e) => Err(e),
        };

        match result {
            Ok(recommendations) => {
                debug!(count = recommendations.len(), "recommendations generated");
                recommendations
            }
            Err(e) => {
                warn!(
                    operation = "generate_recommendations",
                    error = %e,
                    "using built-in recommendations"
                );
                fallback::recommendations()
            }
        }
    }

    /// Short companion line for `context`.
    ///
    /// `question_ordinal` is the 1-based question number for
    /// [`MessageContext::Question`].
    pub async fn generate_message(
        &self,
        context: MessageContext,
        question_ordinal: Option<usize>,
    ) -> String {
        let prompt = prompts::build_message_prompt(context, question_ordinal);
        let result = match self.complete("generate_message", prompt).await {
            Ok(text) => parsing::clean_message(&text).map_err(GatewayFailure::Format),
            Err(e) => Err(e),
        };

        match result {
            Ok(message) => message,
            Err(e) => {
                warn!(
                    operation = "generate_message",
                    context = context.as_str(),
                    error = %e,
                    "using built-in message"
                );
                fallback::message(context).to_string()
            }
        }
    }

    /// Confirm the provider is reachable and accepts the configured key.
    ///
    /// Unlike the content operations this reports the error instead of
    /// falling back.
    pub async fn check_connection(&self) -> LlmResult<()> {
        let provider = self.provider.as_ref().ok_or_else(|| LlmError::AuthenticationFailed {
            message: "API key not configured".to_string(),
        })?;

        let result = match timeout(self.options.request_timeout, provider.health_check()).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout {
                seconds: self.options.request_timeout.as_secs(),
            }),
        };
        match &result {
            Ok(()) => info!(provider = provider.name(), model = provider.model(), "provider reachable"),
            Err(e) => warn!(provider = provider.name(), error = %e, "provider health check failed"),
        }
        result
    }

    /// Send one prompt and return the response text.
    ///
    /// Each attempt is bounded by `request_timeout`. Only transport errors
    /// are retried.
    async fn complete(&self, operation: &'static str, prompt: String) -> Result<String, GatewayFailure> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            GatewayFailure::Transport(LlmError::AuthenticationFailed {
                message: "API key not configured".to_string(),
            })
        })?;

        let attempts = self.options.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            debug!(
                operation,
                attempt,
                provider = provider.name(),
                prompt_len = prompt.len(),
                "sending request"
            );

            let call = provider.send_message(
                vec![Message::user(prompt.clone())],
                None,
                LlmRequestOptions::default(),
            );
            let result = match timeout(self.options.request_timeout, call).await {
                Ok(result) => result,
                Err(_) => Err(LlmError::Timeout {
                    seconds: self.options.request_timeout.as_secs(),
                }),
            };

            match result {
                Ok(response) => {
                    return match response.text() {
                        Some(text) => Ok(text.to_string()),
                        None => Err(GatewayFailure::Format(format!(
                            "response contained no text (model: {}, stop_reason: {:?})",
                            response.model, response.stop_reason
                        ))),
                    };
                }
                Err(e) => {
                    let retry = attempt < attempts && is_retryable(&e);
                    warn!(operation, attempt, error = %e, retry, "request attempt failed");
                    last_error = Some(e);
                    if !retry {
                        break;
                    }
                }
            }
        }

        Err(GatewayFailure::Transport(last_error.unwrap_or(LlmError::Other {
            message: "no attempt was made".to_string(),
        })))
    }
}
