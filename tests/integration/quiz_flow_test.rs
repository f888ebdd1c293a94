//! Quiz Flow Integration Tests
//!
//! Full attempts through `QuizFlow`: the input lock, restart while a
//! request is in flight, and the results hand-off.

use std::sync::Arc;
use std::time::Duration;

use career_compass::services::quiz::decode_answers_payload;
use career_compass::{AppConfig, AppError, AppState, CompanionMood, QuizFlow};
use career_compass_core::CareerCategory;

use crate::support::{self, RoutingProvider};

fn flow_with(provider: &Arc<RoutingProvider>) -> Arc<QuizFlow> {
    Arc::new(QuizFlow::new(Arc::new(support::gateway(provider))))
}

#[tokio::test]
async fn test_generated_attempt_end_to_end() {
    let provider = Arc::new(RoutingProvider::new());
    let flow = flow_with(&provider);

    let view = flow.start(3).await.unwrap();
    assert_eq!(view.total, 3);
    assert_eq!(view.question.as_ref().unwrap().id, "gen_0");
    assert_eq!(view.message.text, "Blue skies, cadet!");

    for option in [0, 3] {
        let view = flow.select_option(option).await.unwrap();
        assert!(!view.completed);
        assert_eq!(view.message.mood, CompanionMood::Encouraging);
    }
    let view = flow.select_option(1).await.unwrap();
    assert!(view.completed);
    assert_eq!(view.message.mood, CompanionMood::Congratulating);

    let results = flow.finish().await.unwrap();
    assert_eq!(results.recommendations.len(), 3);
    assert_eq!(results.profile.recommendations, results.recommendations);
    assert_eq!(
        results.profile.interests,
        [CareerCategory::Aviation, CareerCategory::Technology, CareerCategory::Healthcare]
    );
    let selected: Vec<_> = results.answers.iter().map(|a| a.selected_option).collect();
    assert_eq!(selected, [0, 3, 1]);
}

#[tokio::test]
async fn test_select_while_busy_is_rejected() {
    let provider = Arc::new(RoutingProvider::new());
    let flow = flow_with(&provider);
    flow.start(3).await.unwrap();

    provider.set_delay(Duration::from_millis(300));
    let pending = {
        let flow = flow.clone();
        tokio::spawn(async move { flow.select_option(0).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(flow.is_busy());
    assert_eq!(flow.mood(), CompanionMood::Thinking);
    let err = flow.select_option(1).await.unwrap_err();
    assert!(matches!(err, AppError::Busy(_)));

    let view = pending.await.unwrap().unwrap();
    assert_eq!(view.ordinal, Some(2));
    assert!(!flow.is_busy());

    // only the first tap was recorded
    provider.set_delay(Duration::ZERO);
    let view = flow.select_option(2).await.unwrap();
    assert_eq!(view.ordinal, Some(3));
}

#[tokio::test]
async fn test_restart_discards_late_message() {
    let provider = Arc::new(RoutingProvider::new());
    let flow = flow_with(&provider);
    flow.start(2).await.unwrap();

    provider.set_delay(Duration::from_millis(300));
    let pending = {
        let flow = flow.clone();
        tokio::spawn(async move { flow.select_option(0).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    flow.restart().await;

    let err = pending.await.unwrap().unwrap_err();
    assert_eq!(err.to_string(), "Invalid state: session was restarted");

    let err = flow.select_option(1).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn test_restart_discards_late_results() {
    let provider = Arc::new(RoutingProvider::new());
    let flow = flow_with(&provider);
    flow.start(1).await.unwrap();
    flow.select_option(0).await.unwrap();

    provider.set_delay(Duration::from_millis(300));
    let pending = {
        let flow = flow.clone();
        tokio::spawn(async move { flow.finish().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    flow.restart().await;

    let err = pending.await.unwrap().unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn test_payload_hand_off() {
    let provider = Arc::new(RoutingProvider::new());
    let flow = flow_with(&provider);

    let payload = r#"[
        {"questionId":"a","selectedOption":0,"category":"sports"},
        {"questionId":"b","selectedOption":1,"category":"healthcare"},
        {"questionId":"c","selectedOption":2,"category":"sports"}
    ]"#;
    let results = flow.recommend_for_payload(Some(payload)).await.unwrap();
    assert_eq!(results.answers.len(), 3);
    assert_eq!(results.profile.top_interest(), Some(CareerCategory::Sports));
    assert_eq!(results.recommendations.len(), 3);

    let calls = provider.calls();
    let err = flow.recommend_for_payload(Some("{\"oops\":")).await.unwrap_err();
    assert_eq!(String::from(err), "Invalid input: Unable to process assessment results");
    assert_eq!(provider.calls(), calls);

    assert!(decode_answers_payload(None).is_err());
}

#[tokio::test]
async fn test_state_without_api_key_runs_on_fallbacks() {
    let state = AppState::from_config(AppConfig {
        question_count: 4,
        ..AppConfig::default()
    });
    assert!(state.gateway().is_fallback_only());

    let flow = state.flow();
    let view = flow.start(state.config().question_count).await.unwrap();
    assert_eq!(view.total, 4);
    assert_eq!(view.question.unwrap().id, "fallback_1");
    for _ in 0..4 {
        flow.select_option(0).await.unwrap();
    }
    let results = flow.finish().await.unwrap();
    assert_eq!(results.recommendations[0].title, "Commercial Airline Pilot");
}

#[tokio::test]
async fn test_one_request_in_flight_at_a_time() {
    let provider = Arc::new(RoutingProvider::new());
    provider.set_delay(Duration::from_millis(20));
    let flow = flow_with(&provider);

    flow.start(1).await.unwrap();
    assert_eq!(provider.calls(), 2);
    assert_eq!(provider.peak_in_flight(), 1);

    flow.select_option(0).await.unwrap();
    provider.reset_peak();
    let calls = provider.calls();
    flow.finish().await.unwrap();
    assert_eq!(provider.calls(), calls + 2);
    assert_eq!(provider.peak_in_flight(), 1);
}

#[tokio::test]
async fn test_restart_during_start_leaves_no_session() {
    let provider = Arc::new(RoutingProvider::new());
    provider.set_delay(Duration::from_millis(100));
    let flow = flow_with(&provider);

    let pending = {
        let flow = flow.clone();
        tokio::spawn(async move { flow.start(2).await })
    };
    // restart lands while the questions request is outstanding
    tokio::time::sleep(Duration::from_millis(150)).await;
    flow.restart().await;

    let err = pending.await.unwrap().unwrap_err();
    assert_eq!(err.to_string(), "Invalid state: session was restarted");
    assert!(!flow.is_busy());

    provider.set_delay(Duration::ZERO);
    let err = flow.select_option(0).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}
