//! Career Compass LLM
//!
//! Provides a unified interface for text-generation providers. The only
//! backend today is Google Gemini; callers depend on the `LlmProvider` trait so
//! tests can substitute scripted providers.

pub mod gemini;
pub mod http_client;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::{build_http_client, DEFAULT_REQUEST_TIMEOUT};
pub use provider::LlmProvider;
pub use types::*;
