//! Quiz engine error types.
//!
//! Loading and export code reports failures through `anyhow`; the engine
//! itself only fails in the few ways listed here, so callers can branch on
//! them without string matching.

use thiserror::Error;

/// Errors raised by a [`QuizSession`](crate::engine::QuizSession).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// Tried to move past or finalize on a question without a selection.
    #[error("question '{question_id}' has no answer selected")]
    AnswerMissing { question_id: String },

    /// The choice index does not exist on the question.
    #[error("choice {index} is out of range for question '{question_id}' ({available} choices)")]
    ChoiceOutOfRange {
        question_id: String,
        index: usize,
        available: usize,
    },

    /// No question with this id is part of the session.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// A session needs at least one question.
    #[error("quiz has no questions")]
    EmptyQuiz,
}

impl QuizError {
    /// Returns `true` for the navigation gate error.
    pub fn is_answer_missing(&self) -> bool {
        matches!(self, QuizError::AnswerMissing { .. })
    }

    /// The question the error refers to, if any.
    pub fn question_id(&self) -> Option<&str> {
        match self {
            QuizError::AnswerMissing { question_id }
            | QuizError::ChoiceOutOfRange { question_id, .. } => Some(question_id),
            QuizError::UnknownQuestion(id) => Some(id),
            QuizError::EmptyQuiz => None,
        }
    }
}
