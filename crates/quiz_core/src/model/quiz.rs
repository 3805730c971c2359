//! Quiz record and write-side draft.
//!
//! # Responsibility
//! - Define the question/answer record persisted by the quiz store.
//! - Normalize and validate user-entered text before persistence.
//! - Own the answer comparison rule used by play and test modes.
//!
//! # Invariants
//! - `id` is assigned by storage, never reused after delete.
//! - `question` and `answer` carry no surrounding whitespace and are never empty.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// Stable storage identifier of a quiz record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizId(pub i64);

impl Display for QuizId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuizId {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<i64>().map(Self)
    }
}

/// Validation error for quiz text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizValidationError {
    EmptyQuestion,
    EmptyAnswer,
}

impl Display for QuizValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuestion => write!(f, "question cannot be empty"),
            Self::EmptyAnswer => write!(f, "answer cannot be empty"),
        }
    }
}

impl Error for QuizValidationError {}

/// A persisted question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    pub question: String,
    pub answer: String,
}

impl Quiz {
    /// Checks a user answer against the stored one.
    ///
    /// Surrounding whitespace of the input is ignored and both sides are
    /// compared in uppercase, so accents still have to match.
    pub fn is_correct_answer(&self, given: &str) -> bool {
        given.trim().to_uppercase() == self.answer.to_uppercase()
    }

    /// Validates text read back from storage.
    pub fn validate(&self) -> Result<(), QuizValidationError> {
        validate_text(&self.question, &self.answer)
    }
}

/// Normalized input for creating or replacing a quiz.
///
/// Construction is the only place where user text gets trimmed, so every
/// draft that exists is already valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    question: String,
    answer: String,
}

impl QuizDraft {
    pub fn new(question: &str, answer: &str) -> Result<Self, QuizValidationError> {
        let question = question.trim();
        let answer = answer.trim();
        validate_text(question, answer)?;
        Ok(Self {
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Binds this draft to a storage id.
    pub fn into_quiz(self, id: QuizId) -> Quiz {
        Quiz {
            id,
            question: self.question,
            answer: self.answer,
        }
    }
}

fn validate_text(question: &str, answer: &str) -> Result<(), QuizValidationError> {
    if question.trim().is_empty() {
        return Err(QuizValidationError::EmptyQuestion);
    }
    if answer.trim().is_empty() {
        return Err(QuizValidationError::EmptyAnswer);
    }
    Ok(())
}
