//! Recommendation Gateway
//!
//! Remote content generation with validated parsing and built-in fallbacks.

pub mod fallback;
pub mod parsing;
pub mod prompts;
pub mod service;

pub use service::{GatewayOptions, RecommendationGateway};
