//! Services
//!
//! Business logic for the quiz and its content.

pub mod gateway;
pub mod quiz;

pub use gateway::{GatewayOptions, RecommendationGateway};
pub use quiz::{QuizFlow, QuizSessionManager};
