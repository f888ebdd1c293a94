//! Quiz Flow
//!
//! Drives one quiz attempt for a presentation layer: fetches content from
//! the gateway, feeds answers to the session manager, and discards results
//! that arrive after a restart.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use career_compass_core::{Answer, CareerProfile, CareerRecommendation, Question};

use super::session::{QuizSessionManager, QuizState};
use crate::models::companion::{CompanionMessage, CompanionMood, MessageContext};
use crate::services::gateway::RecommendationGateway;
use crate::utils::error::{AppError, AppResult};

const RESULTS_UNAVAILABLE: &str = "Unable to process assessment results";

/// Snapshot of the quiz for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    /// Question awaiting an answer, `None` once completed
    pub question: Option<Question>,
    /// 1-based ordinal of `question`
    pub ordinal: Option<usize>,
    pub total: usize,
    pub progress: f64,
    pub message: CompanionMessage,
    pub completed: bool,
}

impl QuizView {
    fn from_manager(manager: &QuizSessionManager, message: CompanionMessage) -> Self {
        Self {
            question: manager.current_question().cloned(),
            ordinal: manager.question_ordinal(),
            total: manager.session().total_questions(),
            progress: manager.progress_fraction(),
            message,
            completed: manager.is_completed(),
        }
    }
}

/// Everything shown on the results screen
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResults {
    pub answers: Vec<Answer>,
    pub recommendations: Vec<CareerRecommendation>,
    pub profile: CareerProfile,
    pub message: CompanionMessage,
}

/// Held while a gateway request is in flight; released on drop.
struct InputLock<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InputLock<'a> {
    fn acquire(flag: &'a AtomicBool) -> AppResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::busy("still waiting on the previous request"))?;
        Ok(Self { flag })
    }
}

impl Drop for InputLock<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Decode the answers handed over to the results screen.
///
/// A missing, malformed or empty payload is a user-visible error.
pub fn decode_answers_payload(payload: Option<&str>) -> AppResult<Vec<Answer>> {
    let payload = payload
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::invalid_input(RESULTS_UNAVAILABLE))?;

    let answers: Vec<Answer> = serde_json::from_str(payload).map_err(|e| {
        warn!(error = %e, "answers payload could not be decoded");
        AppError::invalid_input(RESULTS_UNAVAILABLE)
    })?;

    if answers.is_empty() {
        return Err(AppError::invalid_input(RESULTS_UNAVAILABLE));
    }
    Ok(answers)
}

/// One quiz attempt at a time, shared with the presentation layer
pub struct QuizFlow {
    gateway: Arc<RecommendationGateway>,
    manager: Mutex<Option<QuizSessionManager>>,
    /// Bumped by `start` and `restart`; late results compare against it
    epoch: AtomicU64,
    busy: AtomicBool,
}

impl QuizFlow {
    pub fn new(gateway: Arc<RecommendationGateway>) -> Self {
        Self {
            gateway,
            manager: Mutex::new(None),
            epoch: AtomicU64::new(0),
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a request is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Mood to show right now
    pub fn mood(&self) -> CompanionMood {
        if self.is_busy() {
            CompanionMood::Thinking
        } else {
            CompanionMood::Friendly
        }
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    fn ensure_epoch(&self, expected: u64) -> AppResult<()> {
        if self.current_epoch() != expected {
            debug!(expected, current = self.current_epoch(), "discarding stale result");
            return Err(AppError::invalid_state("session was restarted"));
        }
        Ok(())
    }

    /// Begin a new attempt with `question_count` generated questions.
    pub async fn start(&self, question_count: usize) -> AppResult<QuizView> {
        let _lock = InputLock::acquire(&self.busy)?;
        let epoch = {
            let mut guard = self.manager.lock().await;
            *guard = None;
            self.epoch.fetch_add(1, Ordering::AcqRel) + 1
        };

        let welcome = self
            .gateway
            .generate_message(MessageContext::Welcome, None)
            .await;
        let questions = self.gateway.generate_questions(&[], question_count).await;

        let manager = QuizSessionManager::new(questions)?;
        let view = QuizView::from_manager(
            &manager,
            CompanionMessage::new(MessageContext::Welcome, welcome),
        );

        // checked under the guard so a concurrent restart cannot slip in
        let mut guard = self.manager.lock().await;
        self.ensure_epoch(epoch)?;
        *guard = Some(manager);
        Ok(view)
    }

    /// Answer the current question and fetch the next companion line.
    pub async fn select_option(&self, option_index: usize) -> AppResult<QuizView> {
        let _lock = InputLock::acquire(&self.busy)?;
        let epoch = self.current_epoch();

        let (state, mut view) = {
            let mut guard = self.manager.lock().await;
            let manager = guard
                .as_mut()
                .ok_or_else(|| AppError::invalid_state("no quiz in progress"))?;
            let state = manager.submit_answer(option_index)?;
            let placeholder = CompanionMessage {
                text: String::new(),
                mood: CompanionMood::Thinking,
            };
            (state, QuizView::from_manager(manager, placeholder))
        };

        let context = match state {
            QuizState::Active(_) => MessageContext::Question,
            QuizState::Completed => MessageContext::Completion,
        };
        let text = self.gateway.generate_message(context, view.ordinal).await;
        self.ensure_epoch(epoch)?;

        view.message = CompanionMessage::new(context, text);
        Ok(view)
    }

    /// Companion line for a student who is taking their time
    pub async fn encouragement(&self) -> CompanionMessage {
        let text = self
            .gateway
            .generate_message(MessageContext::Encouragement, None)
            .await;
        CompanionMessage::new(MessageContext::Encouragement, text)
    }

    /// Hand the completed session over for recommendations.
    pub async fn finish(&self) -> AppResult<QuizResults> {
        let _lock = InputLock::acquire(&self.busy)?;
        let epoch = self.current_epoch();

        let manager = {
            let mut guard = self.manager.lock().await;
            match guard.as_ref() {
                None => return Err(AppError::invalid_state("no quiz in progress")),
                Some(m) if !m.is_completed() => {
                    return Err(AppError::invalid_state(format!(
                        "quiz is not complete ({} of {} answered)",
                        m.answers().len(),
                        m.session().total_questions()
                    )));
                }
                Some(_) => {}
            }
            guard
                .take()
                .ok_or_else(|| AppError::internal("quiz session disappeared"))?
        };

        let session_id = manager.session().id.clone();
        let answers = manager.into_answers();
        let results = self.build_results(answers).await;
        self.ensure_epoch(epoch)?;

        info!(
            session_id = %session_id,
            recommendations = results.recommendations.len(),
            "quiz results ready"
        );
        Ok(results)
    }

    /// Recommendations for answers handed over as a JSON payload.
    pub async fn recommend_for_payload(&self, payload: Option<&str>) -> AppResult<QuizResults> {
        let answers = decode_answers_payload(payload)?;
        let _lock = InputLock::acquire(&self.busy)?;
        let epoch = self.current_epoch();

        let results = self.build_results(answers).await;
        self.ensure_epoch(epoch)?;
        Ok(results)
    }

    /// Drop the current attempt. Anything still in flight is discarded.
    pub async fn restart(&self) {
        let mut guard = self.manager.lock().await;
        *guard = None;
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        info!(epoch, "quiz restarted");
    }

    async fn build_results(&self, answers: Vec<Answer>) -> QuizResults {
        let recommendations = self.gateway.generate_recommendations(&answers).await;
        let completion = self
            .gateway
            .generate_message(MessageContext::Completion, None)
            .await;
        let profile = CareerProfile::from_answers(&answers, recommendations.clone());
        QuizResults {
            answers,
            recommendations,
            profile,
            message: CompanionMessage::new(MessageContext::Completion, completion),
        }
    }
}
