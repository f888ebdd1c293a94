//! Career Compass Core
//!
//! Domain types and error types shared by the Career Compass workspace. This
//! crate has no knowledge of the text-generation backend or of the quiz flow.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `career` - Questions, answers, recommendations and career categories

pub mod career;
pub mod error;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Domain Types ───────────────────────────────────────────────────────
pub use career::{
    clamp_match_percentage, Answer, CareerCategory, CareerProfile, CareerRecommendation,
    Question, MAX_MATCH_PERCENTAGE, MIN_MATCH_PERCENTAGE, OPTION_COUNT,
};
