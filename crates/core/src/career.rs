//! Career Domain Types
//!
//! Questions, answers, recommendations and the closed set of career
//! categories they are tagged with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Number of options every multiple-choice question carries.
pub const OPTION_COUNT: usize = 4;

/// Lowest match percentage ever reported for a recommendation.
pub const MIN_MATCH_PERCENTAGE: u8 = 60;

/// Highest match percentage ever reported for a recommendation.
pub const MAX_MATCH_PERCENTAGE: u8 = 95;

/// Career domain tag attached to questions and recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerCategory {
    Aviation,
    Technology,
    Healthcare,
    Business,
    Creative,
    Engineering,
    Education,
    Science,
    SocialServices,
    Sports,
}

impl CareerCategory {
    /// Every category, in declaration order.
    pub const ALL: [CareerCategory; 10] = [
        Self::Aviation,
        Self::Technology,
        Self::Healthcare,
        Self::Business,
        Self::Creative,
        Self::Engineering,
        Self::Education,
        Self::Science,
        Self::SocialServices,
        Self::Sports,
    ];

    /// Wire name, as used in prompts and JSON payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aviation => "aviation",
            Self::Technology => "technology",
            Self::Healthcare => "healthcare",
            Self::Business => "business",
            Self::Creative => "creative",
            Self::Engineering => "engineering",
            Self::Education => "education",
            Self::Science => "science",
            Self::SocialServices => "social_services",
            Self::Sports => "sports",
        }
    }

    /// Display label for result cards
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aviation => "Aviation",
            Self::Technology => "Technology",
            Self::Healthcare => "Healthcare",
            Self::Business => "Business",
            Self::Creative => "Creative",
            Self::Engineering => "Engineering",
            Self::Education => "Education",
            Self::Science => "Science",
            Self::SocialServices => "Social Services",
            Self::Sports => "Sports",
        }
    }

    /// Comma-separated list of all wire names, for prompt instructions.
    pub fn wire_names() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for CareerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CareerCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| CoreError::parse(format!("unknown career category: {:?}", s)))
    }
}

/// A multiple-choice question shown during the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within a session
    pub id: String,
    /// Prompt text
    pub question: String,
    /// Exactly [`OPTION_COUNT`] options, in display order
    pub options: Vec<String>,
    pub category: CareerCategory,
}

impl Question {
    /// Build a question, checking the id and option count.
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        options: Vec<String>,
        category: CareerCategory,
    ) -> CoreResult<Self> {
        let id = id.into();
        let question = question.into();
        if id.trim().is_empty() {
            return Err(CoreError::validation("question id must not be empty"));
        }
        if question.trim().is_empty() {
            return Err(CoreError::validation(format!(
                "question '{}' has empty text",
                id
            )));
        }
        if options.len() != OPTION_COUNT {
            return Err(CoreError::validation(format!(
                "question '{}' has {} options, expected {}",
                id,
                options.len(),
                OPTION_COUNT
            )));
        }
        Ok(Self {
            id,
            question,
            options,
            category,
        })
    }
}

/// The user's selection for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    /// Index into the originating question's options
    pub selected_option: usize,
    /// Copied from the question
    pub category: CareerCategory,
}

impl Answer {
    /// Record a selection against `question`.
    ///
    /// Fails when `selected_option` does not index into the question's options.
    pub fn for_question(question: &Question, selected_option: usize) -> CoreResult<Self> {
        if selected_option >= question.options.len() {
            return Err(CoreError::validation(format!(
                "option index {} is out of range for question '{}' ({} options)",
                selected_option,
                question.id,
                question.options.len()
            )));
        }
        Ok(Self {
            question_id: question.id.clone(),
            selected_option,
            category: question.category,
        })
    }
}

/// A career suggested at the end of the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendation {
    /// Unique key within a result set
    pub title: String,
    pub description: String,
    /// Always within [`MIN_MATCH_PERCENTAGE`, `MAX_MATCH_PERCENTAGE`]
    pub match_percentage: u8,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub education_path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_salary: Option<String>,
    pub job_outlook: String,
    pub category: CareerCategory,
}

/// Round and clamp a raw relevance score into the reportable range.
pub fn clamp_match_percentage(raw: f64) -> u8 {
    if raw.is_nan() {
        return MIN_MATCH_PERCENTAGE;
    }
    raw.round()
        .clamp(MIN_MATCH_PERCENTAGE as f64, MAX_MATCH_PERCENTAGE as f64) as u8
}

/// Summary of a finished assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProfile {
    /// Categories touched by the answers, most frequent first
    pub interests: Vec<CareerCategory>,
    pub recommendations: Vec<CareerRecommendation>,
}

impl CareerProfile {
    /// Rank answer categories by frequency; ties keep first-seen order.
    pub fn from_answers(answers: &[Answer], recommendations: Vec<CareerRecommendation>) -> Self {
        let mut counts: Vec<(CareerCategory, usize)> = Vec::new();
        for answer in answers {
            match counts.iter_mut().find(|(c, _)| *c == answer.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((answer.category, 1)),
            }
        }
        // stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            interests: counts.into_iter().map(|(c, _)| c).collect(),
            recommendations,
        }
    }

    /// The strongest interest, if any answers were given
    pub fn top_interest(&self) -> Option<CareerCategory> {
        self.interests.first().copied()
    }
}
