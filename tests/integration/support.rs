//! Shared test doubles

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use career_compass::{GatewayOptions, RecommendationGateway};
use career_compass_llm::{
    LlmError, LlmProvider, LlmRequestOptions, LlmResponse, LlmResult, Message, StopReason,
    UsageStats,
};

pub const MESSAGE_TEXT: &str = "\"Blue skies, cadet!\"";

/// Answers each prompt by kind, so concurrent calls stay deterministic.
pub struct RoutingProvider {
    pub questions: Mutex<String>,
    pub recommendations: Mutex<String>,
    pub message: Mutex<LlmResult<String>>,
    delay_ms: AtomicU64,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl RoutingProvider {
    pub fn new() -> Self {
        Self {
            questions: Mutex::new(questions_json(10)),
            recommendations: Mutex::new(recommendations_json(&[
                ("Air Traffic Controller", 91.0),
                ("Flight Instructor", 84.0),
                ("Avionics Technician", 72.0),
            ])),
            message: Mutex::new(Ok(MESSAGE_TEXT.to_string())),
            delay_ms: AtomicU64::new(0),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most requests ever outstanding at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn reset_peak(&self) {
        self.peak_in_flight.store(0, Ordering::SeqCst);
    }
}

pub fn questions_json(n: usize) -> String {
    let categories = ["aviation", "technology", "healthcare", "sports", "science"];
    let items: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"id":"gen_{}","question":"Generated question {}?","options":["One","Two","Three","Four"],"category":"{}"}}"#,
                i,
                i,
                categories[i % categories.len()]
            )
        })
        .collect();
    format!("Here are your questions:\n[{}]", items.join(","))
}

pub fn recommendations_json(items: &[(&str, f64)]) -> String {
    let items: Vec<String> = items
        .iter()
        .map(|(title, pct)| {
            format!(
                r#"{{"title":"{}","description":"About {}","matchPercentage":{},"requiredSkills":["Focus"],"educationPath":["Training"],"averageSalary":"$60,000 - $90,000","jobOutlook":"Stable","category":"aviation"}}"#,
                title, title, pct
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

fn response(text: String) -> LlmResponse {
    LlmResponse {
        content: Some(text),
        stop_reason: StopReason::EndTurn,
        usage: UsageStats::default(),
        model: "routing-mock".to_string(),
    }
}

#[async_trait]
impl LlmProvider for RoutingProvider {
    fn name(&self) -> &'static str {
        "routing-mock"
    }

    fn model(&self) -> &str {
        "routing-mock"
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        _system: Option<String>,
        _request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outstanding = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(outstanding, Ordering::SeqCst);

        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let prompt = messages.first().map(|m| m.text.as_str()).unwrap_or_default();
        if prompt.contains("multiple-choice questions") {
            Ok(response(self.questions.lock().unwrap().clone()))
        } else if prompt.contains("Recommend between 3 and 5") {
            Ok(response(self.recommendations.lock().unwrap().clone()))
        } else {
            self.message.lock().unwrap().clone().map(response)
        }
    }

    async fn health_check(&self) -> LlmResult<()> {
        Ok(())
    }
}

pub fn gateway_with(
    provider: &Arc<RoutingProvider>,
    options: GatewayOptions,
) -> RecommendationGateway {
    RecommendationGateway::new(Some(provider.clone() as Arc<dyn LlmProvider>), options)
}

pub fn gateway(provider: &Arc<RoutingProvider>) -> RecommendationGateway {
    gateway_with(provider, GatewayOptions::default())
}

pub fn network_error() -> LlmError {
    LlmError::NetworkError {
        message: "connection reset".to_string(),
    }
}
