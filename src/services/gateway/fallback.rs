//! Built-in Content
//!
//! Pre-authored payloads served whenever the remote service cannot produce
//! valid output. Every item here satisfies the same validation rules as a
//! parsed response.

use career_compass_core::{CareerCategory, CareerRecommendation, Question};

use crate::models::companion::MessageContext;

fn question(id: &str, text: &str, options: [&str; 4], category: CareerCategory) -> Question {
    Question {
        id: id.to_string(),
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        category,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The five built-in questions, truncated to `count`
pub fn questions(count: usize) -> Vec<Question> {
    let mut all = vec![
        question(
            "fallback_1",
            "When working on a project, what energizes you most?",
            [
                "Solving complex technical problems",
                "Leading and coordinating the team",
                "Creating something beautiful or innovative",
                "Helping others achieve their goals",
            ],
            CareerCategory::Technology,
        ),
        question(
            "fallback_2",
            "Which scenario sounds most appealing to you?",
            [
                "Flying an aircraft through challenging weather",
                "Designing the next generation of spacecraft",
                "Teaching others about aviation safety",
                "Managing airport operations",
            ],
            CareerCategory::Aviation,
        ),
        question(
            "fallback_3",
            "What type of environment do you thrive in?",
            [
                "Fast-paced, high-stakes situations",
                "Quiet spaces for deep focus and analysis",
                "Collaborative team environments",
                "Dynamic settings with variety and travel",
            ],
            CareerCategory::Business,
        ),
        question(
            "fallback_4",
            "When facing a challenge, your first instinct is to:",
            [
                "Research and analyze all possible solutions",
                "Brainstorm creative alternatives",
                "Consult with experts and mentors",
                "Take immediate action based on experience",
            ],
            CareerCategory::Science,
        ),
        question(
            "fallback_5",
            "What motivates you most in your ideal career?",
            [
                "Making a positive impact on people's lives",
                "Pushing the boundaries of what's possible",
                "Building and growing successful ventures",
                "Expressing creativity and artistic vision",
            ],
            CareerCategory::Creative,
        ),
    ];
    all.truncate(count);
    all
}

/// The two built-in recommendations
pub fn recommendations() -> Vec<CareerRecommendation> {
    vec![
        CareerRecommendation {
            title: "Commercial Airline Pilot".to_string(),
            description:
                "Operate aircraft for airlines, ensuring safe passenger and cargo transportation."
                    .to_string(),
            match_percentage: 85,
            required_skills: strings(&[
                "Flight skills",
                "Decision making",
                "Communication",
                "Attention to detail",
            ]),
            education_path: strings(&[
                "Commercial pilot license",
                "Airline transport pilot license",
                "Type ratings",
            ]),
            average_salary: Some("$80,000 - $200,000".to_string()),
            job_outlook: "Growing - airline industry expansion expected".to_string(),
            category: CareerCategory::Aviation,
        },
        CareerRecommendation {
            title: "Aerospace Engineer".to_string(),
            description: "Design and develop aircraft, spacecraft, and aviation systems."
                .to_string(),
            match_percentage: 75,
            required_skills: strings(&[
                "Engineering principles",
                "CAD software",
                "Problem solving",
                "Mathematics",
            ]),
            education_path: strings(&[
                "Bachelor in Aerospace Engineering",
                "Professional Engineer license",
            ]),
            average_salary: Some("$70,000 - $130,000".to_string()),
            job_outlook: "Stable - continued demand for aviation innovation".to_string(),
            category: CareerCategory::Engineering,
        },
    ]
}

/// Fixed companion line for each context
pub fn message(context: MessageContext) -> &'static str {
    match context {
        MessageContext::Welcome => {
            "Welcome aboard! I'm Captain Sky, and I'm here to help you discover your perfect career path. Ready for takeoff?"
        }
        MessageContext::Question => {
            "Great thinking! Take your time with this one - every good pilot knows the importance of careful consideration."
        }
        MessageContext::Encouragement => {
            "You're doing fantastic! Keep going - we're building a clear picture of your ideal career."
        }
        MessageContext::Completion => {
            "Outstanding work! You've completed your career assessment. Let's see what exciting opportunities await you!"
        }
    }
}
