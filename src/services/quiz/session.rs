//! Quiz Session Manager
//!
//! Deterministic progression through a fixed question list. Pure state
//! transitions, no I/O.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use career_compass_core::{Answer, Question, OPTION_COUNT};

use crate::models::session::QuizSession;
use crate::utils::error::{AppError, AppResult};

/// Where the session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Waiting for the answer to `questions[index]`
    Active(usize),
    /// Every question answered; terminal
    Completed,
}

fn validate_questions(questions: &[Question]) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(questions.len());
    for (i, question) in questions.iter().enumerate() {
        if question.id.trim().is_empty() {
            return Err(AppError::invalid_input(format!("question {} has no id", i)));
        }
        if question.question.trim().is_empty() {
            return Err(AppError::invalid_input(format!(
                "question {} has no text",
                question.id
            )));
        }
        if question.options.len() != OPTION_COUNT {
            return Err(AppError::invalid_input(format!(
                "question {} has {} options, expected {}",
                question.id,
                question.options.len(),
                OPTION_COUNT
            )));
        }
        if !seen.insert(question.id.as_str()) {
            return Err(AppError::invalid_input(format!(
                "duplicate question id: {}",
                question.id
            )));
        }
    }
    Ok(())
}

/// Owns one quiz attempt and applies answers to it.
///
/// Transitions take `&mut self`, so a manager has a single writer at a time;
/// shared callers wrap it in a mutex.
#[derive(Debug, Clone)]
pub struct QuizSessionManager {
    session: QuizSession,
}

impl QuizSessionManager {
    /// Start a session in `Active(0)`.
    ///
    /// Every question needs a unique non-blank id, non-blank text and
    /// exactly `OPTION_COUNT` options.
    pub fn new(questions: Vec<Question>) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::invalid_input(
                "a quiz session needs at least one question",
            ));
        }

        validate_questions(&questions)?;

        let session = QuizSession {
            id: format!("quiz_{}", Uuid::new_v4()),
            questions,
            answers: Vec::new(),
            current_question_index: 0,
            is_completed: false,
            started_at: Utc::now(),
            completed_at: None,
        };

        info!(
            session_id = %session.id,
            questions = session.questions.len(),
            "quiz session started"
        );

        Ok(Self { session })
    }

    /// Current state of the state machine
    pub fn state(&self) -> QuizState {
        if self.session.is_completed {
            QuizState::Completed
        } else {
            QuizState::Active(self.session.current_question_index)
        }
    }

    /// Record the user's choice for the current question and advance.
    ///
    /// An out-of-range `option_index` or a completed session leaves the
    /// session untouched.
    pub fn submit_answer(&mut self, option_index: usize) -> AppResult<QuizState> {
        let index = match self.state() {
            QuizState::Active(index) => index,
            QuizState::Completed => {
                return Err(AppError::invalid_state(format!(
                    "quiz session {} is already complete",
                    self.session.id
                )));
            }
        };

        let question = &self.session.questions[index];
        let answer = Answer::for_question(question, option_index)
            .map_err(|e| AppError::invalid_input(e.to_string()))?;

        debug!(
            session_id = %self.session.id,
            question_id = %answer.question_id,
            option = option_index,
            "answer recorded"
        );

        self.session.answers.push(answer);
        self.session.current_question_index = index + 1;

        if self.session.current_question_index == self.session.questions.len() {
            self.session.is_completed = true;
            self.session.completed_at = Some(Utc::now());
            info!(session_id = %self.session.id, "quiz session completed");
        }

        Ok(self.state())
    }

    /// `index / N` while active, `1.0` once completed.
    pub fn progress_fraction(&self) -> f64 {
        if self.session.is_completed {
            return 1.0;
        }
        self.session.current_question_index as f64 / self.session.questions.len() as f64
    }

    /// Question awaiting an answer, `None` once completed
    pub fn current_question(&self) -> Option<&Question> {
        match self.state() {
            QuizState::Active(index) => self.session.questions.get(index),
            QuizState::Completed => None,
        }
    }

    /// 1-based ordinal of the current question, `None` once completed
    pub fn question_ordinal(&self) -> Option<usize> {
        match self.state() {
            QuizState::Active(index) => Some(index + 1),
            QuizState::Completed => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.session.is_completed
    }

    pub fn answers(&self) -> &[Answer] {
        &self.session.answers
    }

    /// Read-only view of the whole session
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Consume the manager, handing the session over for recommendations.
    pub fn into_session(self) -> QuizSession {
        self.session
    }

    /// Consume the manager, keeping only the answers.
    pub fn into_answers(self) -> Vec<Answer> {
        self.session.answers
    }
}
