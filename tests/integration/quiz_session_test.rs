//! Quiz Session Integration Tests
//!
//! State machine properties over the built-in question set and generated
//! questions.

use career_compass::{AppError, QuizSessionManager, QuizState, RecommendationGateway};
use career_compass_core::{CareerProfile, Question};

async fn fallback_questions(count: usize) -> Vec<Question> {
    RecommendationGateway::fallback_only()
        .generate_questions(&[], count)
        .await
}

#[tokio::test]
async fn test_fresh_session_for_every_size() {
    for n in 1..=5 {
        let manager = QuizSessionManager::new(fallback_questions(n).await).unwrap();
        assert_eq!(manager.session().current_question_index, 0);
        assert!(!manager.is_completed());
        assert_eq!(manager.progress_fraction(), 0.0);
        assert_eq!(manager.question_ordinal(), Some(1));
    }
}

#[tokio::test]
async fn test_answers_follow_question_order() {
    let questions = fallback_questions(5).await;
    let mut manager = QuizSessionManager::new(questions.clone()).unwrap();

    let mut last_progress = -1.0;
    for (i, _) in questions.iter().enumerate() {
        let progress = manager.progress_fraction();
        assert!(progress > last_progress);
        last_progress = progress;
        manager.submit_answer(i % 4).unwrap();
    }

    assert_eq!(manager.state(), QuizState::Completed);
    assert_eq!(manager.progress_fraction(), 1.0);
    for (k, answer) in manager.answers().iter().enumerate() {
        assert_eq!(answer.question_id, questions[k].id);
        assert_eq!(answer.category, questions[k].category);
        assert_eq!(answer.selected_option, k % 4);
    }
}

#[tokio::test]
async fn test_rejected_answers_change_nothing() {
    let mut manager = QuizSessionManager::new(fallback_questions(2).await).unwrap();

    for bad in [4, 5, usize::MAX] {
        let err = manager.submit_answer(bad).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
    assert_eq!(manager.state(), QuizState::Active(0));
    assert!(manager.answers().is_empty());

    manager.submit_answer(0).unwrap();
    manager.submit_answer(1).unwrap();
    let err = manager.submit_answer(2).unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert_eq!(manager.answers().len(), 2);
}

#[tokio::test]
async fn test_completed_session_builds_profile() {
    let mut manager = QuizSessionManager::new(fallback_questions(3).await).unwrap();
    for _ in 0..3 {
        manager.submit_answer(0).unwrap();
    }

    let session = manager.session().clone();
    assert!(session.completed_at.is_some());
    assert!(session.completed_at.unwrap() >= session.started_at);

    let answers = manager.into_answers();
    let profile = CareerProfile::from_answers(&answers, Vec::new());
    assert_eq!(profile.interests.len(), 3);
    assert_eq!(profile.top_interest(), Some(answers[0].category));
}

#[test]
fn test_session_serializes_camel_case() {
    let question = Question::new(
        "q1",
        "Pick one?",
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        career_compass_core::CareerCategory::Education,
    )
    .unwrap();
    let mut manager = QuizSessionManager::new(vec![question]).unwrap();
    manager.submit_answer(1).unwrap();

    let json = serde_json::to_value(manager.session()).unwrap();
    assert_eq!(json["currentQuestionIndex"], 1);
    assert_eq!(json["isCompleted"], true);
    assert_eq!(json["answers"][0]["questionId"], "q1");
    assert_eq!(json["answers"][0]["category"], "education");
    assert!(json["completedAt"].is_string());
}
