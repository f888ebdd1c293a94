//! Prompt Builders
//!
//! Instructional text sent to the text-generation service. Every list prompt
//! ends with a strict output-format instruction so the reply carries a
//! single JSON array.

use serde::Serialize;

use career_compass_core::{Answer, CareerCategory, MAX_MATCH_PERCENTAGE, MIN_MATCH_PERCENTAGE};

use crate::models::companion::MessageContext;

/// Character the companion speaks as.
pub const PERSONA: &str = "Captain Sky";

/// The part of an answer shared with the recommendation prompt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerSummary {
    category: CareerCategory,
    selected_option: usize,
}

/// Build the prompt asking for `count` multiple-choice questions.
pub fn build_questions_prompt(prior_answers: &[Answer], count: usize) -> String {
    let context = if prior_answers.is_empty() {
        "Write the opening questions of a career assessment for a student who is still discovering what they enjoy.".to_string()
    } else {
        format!(
            "The student has already answered: {}. Write follow-up questions that sharpen the picture of their interests.",
            serde_json::to_string(prior_answers).unwrap_or_default()
        )
    };

    format!(
        r#"You are {persona}, a veteran aviator who now works as a career counselor. {context}

Write exactly {count} multiple-choice questions, each with exactly 4 options, that reveal a student's interests, personality traits and natural strengths.
Spread the questions across these categories: {categories}.
Prefer short, concrete scenarios a student can relate to.

Respond with ONLY a JSON array in exactly this shape, with no other text:
[
  {{
    "id": "unique_id_1",
    "question": "Question text?",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "category": "aviation"
  }}
]

"category" must be one of: {categories}."#,
        persona = PERSONA,
        context = context,
        count = count,
        categories = CareerCategory::wire_names(),
    )
}

/// Build the prompt asking for 3-5 recommendations from the answers.
///
/// Only the category and selected option of each answer are shared.
pub fn build_recommendations_prompt(answers: &[Answer]) -> String {
    let summary: Vec<AnswerSummary> = answers
        .iter()
        .map(|a| AnswerSummary {
            category: a.category,
            selected_option: a.selected_option,
        })
        .collect();

    format!(
        r#"You are {persona}, an experienced career counselor. Study these career assessment answers and recommend careers that fit the student.

Answers: {answers}

Recommend between 3 and 5 careers that match the interests and aptitudes shown by the answers.

Respond with ONLY a JSON array in exactly this shape, with no other text:
[
  {{
    "title": "Career Title",
    "description": "What the work involves, in one or two sentences",
    "matchPercentage": 85,
    "requiredSkills": ["Skill 1", "Skill 2", "Skill 3"],
    "educationPath": ["Step 1", "Step 2"],
    "averageSalary": "$50,000 - $80,000",
    "jobOutlook": "Growing/Stable/Declining - short reason",
    "category": "aviation"
  }}
]

"category" must be one of: {categories}.
"matchPercentage" must be a whole number between {min} and {max}."#,
        persona = PERSONA,
        answers = serde_json::to_string(&summary).unwrap_or_default(),
        categories = CareerCategory::wire_names(),
        min = MIN_MATCH_PERCENTAGE,
        max = MAX_MATCH_PERCENTAGE,
    )
}

/// Build the prompt for a one or two sentence companion line.
pub fn build_message_prompt(context: MessageContext, question_ordinal: Option<usize>) -> String {
    let instruction = match context {
        MessageContext::Welcome => {
            "Greet a student who is starting the career assessment. Be friendly and encouraging."
                .to_string()
        }
        MessageContext::Question => match question_ordinal {
            Some(n) => format!("Introduce question {}. Keep it short and encouraging.", n),
            None => "Introduce the next question. Keep it short and encouraging.".to_string(),
        },
        MessageContext::Encouragement => {
            "The student is taking their time on a question. Encourage them to keep going."
                .to_string()
        }
        MessageContext::Completion => {
            "The student just finished the assessment. Congratulate them and build excitement for the results."
                .to_string()
        }
    };

    format!(
        r#"You are {persona}, a friendly, experienced aviator who helps students find their career path.
{instruction}

Answer in character in 1-2 sentences. Be warm, professional and inspiring; an occasional aviation metaphor is fine.
Reply with the message text only, without quotes or formatting."#,
        persona = PERSONA,
        instruction = instruction,
    )
}
