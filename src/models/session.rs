//! Session Models
//!
//! Data structures for a single quiz attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use career_compass_core::{Answer, Question};

/// One end-to-end attempt at the quiz.
///
/// Mutated only through `QuizSessionManager`, which keeps
/// `current_question_index == answers.len()` and
/// `is_completed == (current_question_index == questions.len())`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    /// Unique session identifier (`quiz_<uuid>`)
    pub id: String,
    /// Fixed at session start
    pub questions: Vec<Question>,
    /// Grows by one per accepted answer
    pub answers: Vec<Answer>,
    pub current_question_index: usize,
    pub is_completed: bool,
    pub started_at: DateTime<Utc>,
    /// Set exactly when `is_completed` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Number of questions in the session
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}
