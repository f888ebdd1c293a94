//! Companion Models
//!
//! The short status lines the quiz companion speaks, and the mood the
//! presentation layer pairs with them.

use serde::{Deserialize, Serialize};

/// Moment in the quiz a companion message is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageContext {
    Welcome,
    Question,
    Encouragement,
    Completion,
}

impl MessageContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Question => "question",
            Self::Encouragement => "encouragement",
            Self::Completion => "completion",
        }
    }

    /// Mood shown alongside a message for this context
    pub fn mood(&self) -> CompanionMood {
        match self {
            Self::Welcome => CompanionMood::Friendly,
            Self::Question | Self::Encouragement => CompanionMood::Encouraging,
            Self::Completion => CompanionMood::Congratulating,
        }
    }
}

impl std::str::FromStr for MessageContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "welcome" => Ok(Self::Welcome),
            "question" => Ok(Self::Question),
            "encouragement" => Ok(Self::Encouragement),
            "completion" => Ok(Self::Completion),
            other => Err(format!("unknown message context: {}", other)),
        }
    }
}

/// Expression of the quiz companion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanionMood {
    Friendly,
    Encouraging,
    /// A request is in flight
    Thinking,
    Congratulating,
}

/// Text plus mood, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionMessage {
    pub text: String,
    pub mood: CompanionMood,
}

impl CompanionMessage {
    pub fn new(context: MessageContext, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mood: context.mood(),
        }
    }
}
