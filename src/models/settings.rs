//! Settings Models
//!
//! Application configuration data structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use career_compass_llm::ProviderConfig;

/// Application configuration, loadable from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key. Never written back to disk.
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    /// Model used for every generation call
    #[serde(default = "default_model")]
    pub model: String,
    /// API root override (tests, proxies)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Sampling temperature (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Output token cap per call
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Per-attempt timeout for the remote call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Transport attempts before falling back (1 = no retry)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Questions generated at the start of a quiz
    #[serde(default = "default_question_count")]
    pub question_count: usize,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    1
}

fn default_question_count() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: None,
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            max_attempts: default_max_attempts(),
            question_count: default_question_count(),
        }
    }
}

impl AppConfig {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be at least 1".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be at least 1".to_string());
        }
        if !(1..=5).contains(&self.max_attempts) {
            return Err(format!(
                "max_attempts must be between 1 and 5, got {}",
                self.max_attempts
            ));
        }
        if self.question_count == 0 {
            return Err("question_count must be at least 1".to_string());
        }
        Ok(())
    }

    /// Whether a usable API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map_or(false, |k| !k.trim().is_empty())
    }

    /// Per-attempt timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Provider configuration derived from these settings
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_output_tokens,
            temperature: self.temperature,
        }
    }
}
