//! Response Parsing
//!
//! Strict parse-then-validate pipeline for generated content. A batch is
//! accepted whole or rejected whole; errors are returned as plain strings
//! for the gateway to log.

use std::collections::HashSet;

use chrono::Utc;
use serde::Deserialize;

use career_compass_core::{clamp_match_percentage, CareerCategory, CareerRecommendation, Question};

/// Fewest recommendations a response may carry
pub const MIN_RECOMMENDATIONS: usize = 3;
/// Recommendations beyond this are dropped
pub const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    id: Option<String>,
    question: String,
    options: Vec<String>,
    category: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecommendation {
    title: String,
    description: String,
    match_percentage: f64,
    #[serde(default)]
    required_skills: Vec<String>,
    #[serde(default)]
    education_path: Vec<String>,
    #[serde(default)]
    average_salary: Option<String>,
    job_outlook: String,
    category: String,
}

/// Span from the first `[` to the last `]`, inclusive.
fn extract_array_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if start <= end {
        Some(&text[start..=end])
    } else {
        None
    }
}

fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}

fn parse_array<T: for<'de> Deserialize<'de>>(text: &str, what: &str) -> Result<Vec<T>, String> {
    if text.trim().is_empty() {
        return Err("response contained no text".to_string());
    }
    let span = extract_array_span(text).ok_or_else(|| {
        format!(
            "no JSON array in response (response starts with: {:?})",
            preview(text)
        )
    })?;
    serde_json::from_str(span).map_err(|e| {
        format!(
            "failed to parse {} array: {}. JSON starts with: {:?}",
            what,
            e,
            preview(span)
        )
    })
}

fn parse_category(raw: &str) -> Result<CareerCategory, String> {
    raw.parse::<CareerCategory>().map_err(|e| e.to_string())
}

/// Parse exactly `count` questions out of free-form response text.
///
/// Missing or blank ids are backfilled as `q_<unix millis>_<index>`.
/// Every item is validated; items beyond `count` are dropped afterwards.
pub fn parse_questions(text: &str, count: usize) -> Result<Vec<Question>, String> {
    let raw: Vec<RawQuestion> = parse_array(text, "question")?;
    if raw.is_empty() {
        return Err("response contained an empty question array".to_string());
    }
    if raw.len() < count {
        return Err(format!(
            "expected {} questions, response contained {}",
            count,
            raw.len()
        ));
    }

    let stamp = Utc::now().timestamp_millis();
    let mut seen = HashSet::new();
    let mut questions = Vec::with_capacity(raw.len());

    for (index, item) in raw.into_iter().enumerate() {
        let id = match item.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => format!("q_{}_{}", stamp, index),
        };
        if !seen.insert(id.clone()) {
            return Err(format!("duplicate question id '{}'", id));
        }
        let category = parse_category(&item.category)?;
        let question = Question::new(id, item.question, item.options, category)
            .map_err(|e| e.to_string())?;
        questions.push(question);
    }

    questions.truncate(count);
    Ok(questions)
}

/// Parse 3-5 recommendations out of free-form response text.
///
/// Match percentages are rounded and clamped. Every item is validated
/// before the batch is cut to five.
pub fn parse_recommendations(text: &str) -> Result<Vec<CareerRecommendation>, String> {
    let raw: Vec<RawRecommendation> = parse_array(text, "recommendation")?;
    if raw.len() < MIN_RECOMMENDATIONS {
        return Err(format!(
            "expected at least {} recommendations, response contained {}",
            MIN_RECOMMENDATIONS,
            raw.len()
        ));
    }

    let mut seen = HashSet::new();
    let mut recommendations = Vec::with_capacity(raw.len());

    for item in raw {
        let title = item.title.trim().to_string();
        if title.is_empty() {
            return Err("recommendation has an empty title".to_string());
        }
        if !seen.insert(title.clone()) {
            return Err(format!("duplicate recommendation title '{}'", title));
        }
        let category = parse_category(&item.category)?;
        recommendations.push(CareerRecommendation {
            title,
            description: item.description,
            match_percentage: clamp_match_percentage(item.match_percentage),
            required_skills: item.required_skills,
            education_path: item.education_path,
            average_salary: item.average_salary,
            job_outlook: item.job_outlook,
            category,
        });
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    Ok(recommendations)
}

/// Trim and strip one layer of surrounding quotes from a companion line.
pub fn clean_message(text: &str) -> Result<String, String> {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix(['"', '\'']) {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix(['"', '\'']) {
        cleaned = rest;
    }
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err("message was empty after cleanup".to_string());
    }
    Ok(cleaned.to_string())
}
