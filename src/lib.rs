//! Career Compass
//!
//! Backend for a career assessment quiz. It includes:
//! - The quiz session state machine and the flow that drives it
//! - A recommendation gateway over Gemini with built-in fallbacks
//! - Layered configuration
//! - Data models and utilities

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::companion::{CompanionMessage, CompanionMood, MessageContext};
pub use models::session::QuizSession;
pub use models::settings::AppConfig;
pub use services::gateway::{GatewayOptions, RecommendationGateway};
pub use services::quiz::{QuizFlow, QuizResults, QuizSessionManager, QuizState, QuizView};
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
