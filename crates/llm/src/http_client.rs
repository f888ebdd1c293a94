//! HTTP Client Factory
//!
//! Builds the reqwest client shared by providers.

use std::time::Duration;

use crate::types::{LlmError, LlmResult};

/// Timeout applied when the caller does not supply one.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a `reqwest::Client` whose requests give up after `timeout`.
pub fn build_http_client(timeout: Duration) -> LlmResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .build()
        .map_err(|e| LlmError::Other {
            message: format!("failed to build HTTP client: {}", e),
        })
}

/// Map a reqwest transport error onto [`LlmError`].
pub fn transport_error(err: reqwest::Error, timeout: Duration) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout {
            seconds: timeout.as_secs(),
        }
    } else {
        LlmError::NetworkError {
            message: err.to_string(),
        }
    }
}
