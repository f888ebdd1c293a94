//! Recommendation Gateway Integration Tests
//!
//! Generated content goes through the full parse and validate pipeline;
//! every failure mode ends in built-in content, never an error.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use career_compass::services::gateway::fallback;
use career_compass::{GatewayOptions, MessageContext, RecommendationGateway};
use career_compass_core::{Answer, CareerCategory, MAX_MATCH_PERCENTAGE, MIN_MATCH_PERCENTAGE};

use crate::support::{self, RoutingProvider};

fn answers() -> Vec<Answer> {
    vec![
        Answer {
            question_id: "gen_0".to_string(),
            selected_option: 1,
            category: CareerCategory::Aviation,
        },
        Answer {
            question_id: "gen_1".to_string(),
            selected_option: 2,
            category: CareerCategory::Technology,
        },
    ]
}

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn test_generated_questions_truncated_to_count() {
    let provider = Arc::new(RoutingProvider::new());
    let questions = support::gateway(&provider).generate_questions(&[], 4).await;

    assert_eq!(questions.len(), 4);
    assert_eq!(questions[0].id, "gen_0");
    let ids: HashSet<_> = questions.iter().map(|q| q.id.clone()).collect();
    assert_eq!(ids.len(), 4);
    assert!(questions.iter().all(|q| q.options.len() == 4));
}

#[tokio::test]
async fn test_generated_recommendations_kept_in_order() {
    let provider = Arc::new(RoutingProvider::new());
    let recs = support::gateway(&provider)
        .generate_recommendations(&answers())
        .await;

    let titles: Vec<_> = recs.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        ["Air Traffic Controller", "Flight Instructor", "Avionics Technician"]
    );
    assert_eq!(recs[0].match_percentage, 91);
}

#[tokio::test]
async fn test_out_of_range_percentages_clamped() {
    let provider = Arc::new(RoutingProvider::new());
    *provider.recommendations.lock().unwrap() = format!(
        "Based on the answers, I'd suggest: {} Let me know!",
        support::recommendations_json(&[
            ("Pilot", 999.0),
            ("Drone Operator", -5.0),
            ("Navigator", 60.4),
        ])
    );
    let recs = support::gateway(&provider)
        .generate_recommendations(&answers())
        .await;

    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0].match_percentage, 95);
    assert_eq!(recs[1].match_percentage, 60);
    assert_eq!(recs[2].match_percentage, 60);
}

#[tokio::test]
async fn test_message_unquoted() {
    let provider = Arc::new(RoutingProvider::new());
    let message = support::gateway(&provider)
        .generate_message(MessageContext::Question, Some(3))
        .await;
    assert_eq!(message, "Blue skies, cadet!");
}

// ============================================================================
// Fallback path
// ============================================================================

#[tokio::test]
async fn test_prose_only_responses_fall_back() {
    let provider = Arc::new(RoutingProvider::new());
    *provider.questions.lock().unwrap() = "I would ask about their hobbies first.".to_string();
    *provider.recommendations.lock().unwrap() = "They should become a pilot.".to_string();
    let gateway = support::gateway(&provider);

    assert_eq!(gateway.generate_questions(&[], 5).await, fallback::questions(5));
    assert_eq!(
        gateway.generate_recommendations(&answers()).await,
        fallback::recommendations()
    );
}

#[tokio::test]
async fn test_one_bad_category_rejects_whole_batch() {
    let provider = Arc::new(RoutingProvider::new());
    // third question only
    *provider.questions.lock().unwrap() = support::questions_json(3)
        .replace("\"healthcare\"", "\"underwater_basket_weaving\"");
    let questions = support::gateway(&provider).generate_questions(&[], 3).await;

    assert_eq!(questions, fallback::questions(3));
}

#[tokio::test]
async fn test_too_few_recommendations_fall_back() {
    let provider = Arc::new(RoutingProvider::new());
    *provider.recommendations.lock().unwrap() =
        support::recommendations_json(&[("Pilot", 80.0), ("Engineer", 75.0)]);
    let recs = support::gateway(&provider)
        .generate_recommendations(&answers())
        .await;

    assert_eq!(recs, fallback::recommendations());
    for rec in &recs {
        assert!((MIN_MATCH_PERCENTAGE..=MAX_MATCH_PERCENTAGE).contains(&rec.match_percentage));
    }
}

#[tokio::test]
async fn test_transport_error_falls_back_after_retries() {
    let provider = Arc::new(RoutingProvider::new());
    *provider.message.lock().unwrap() = Err(support::network_error());
    let gateway = support::gateway_with(
        &provider,
        GatewayOptions {
            max_attempts: 3,
            ..GatewayOptions::default()
        },
    );

    let message = gateway.generate_message(MessageContext::Encouragement, None).await;
    assert_eq!(message, fallback::message(MessageContext::Encouragement));
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let provider = Arc::new(RoutingProvider::new());
    provider.set_delay(Duration::from_secs(5));
    let gateway = support::gateway_with(
        &provider,
        GatewayOptions {
            request_timeout: Duration::from_millis(50),
            max_attempts: 1,
        },
    );

    let questions = gateway.generate_questions(&[], 2).await;
    assert_eq!(questions, fallback::questions(2));
}

#[tokio::test]
async fn test_fallback_only_gateway() {
    let gateway = RecommendationGateway::new(None, GatewayOptions::default());
    assert!(gateway.is_fallback_only());

    let questions = gateway.generate_questions(&answers(), 3).await;
    assert_eq!(questions.len(), 3);
    for q in &questions {
        assert!(!q.id.is_empty());
        assert_eq!(q.options.len(), 4);
        assert!(CareerCategory::ALL.contains(&q.category));
    }

    assert_eq!(gateway.generate_recommendations(&answers()).await.len(), 2);
    assert_eq!(
        gateway.generate_message(MessageContext::Completion, None).await,
        fallback::message(MessageContext::Completion)
    );
}
