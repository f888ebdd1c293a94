//! Quiz
//!
//! Session state machine and the flow that drives it.

pub mod flow;
pub mod session;

pub use flow::{decode_answers_payload, QuizFlow, QuizResults, QuizView};
pub use session::{QuizSessionManager, QuizState};
